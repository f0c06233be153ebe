//! `web-sys` implementations of the preference collaborators.

mod ambient;
pub mod controls;
mod flag;
mod storage;

pub use ambient::MediaQueryAmbient;
pub use flag::DocumentFlag;
pub use storage::LocalStorage;

use wasm_bindgen::JsValue;

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}
