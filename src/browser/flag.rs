use std::cell::RefCell;

use tracing::warn;

use crate::preference::{DisplayFlag, Preference};

type Observer = Box<dyn Fn(Preference)>;

/// The display-mode attribute on `<html>` (`data-theme` by default), which
/// the stylesheet keys off.
pub struct DocumentFlag {
    attribute: String,
    observers: RefCell<Vec<Observer>>,
}

impl DocumentFlag {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Calls `observer` after every apply, e.g. to keep a control's icon in
    /// step with ambient changes.
    pub fn observe(&self, observer: impl Fn(Preference) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    fn root() -> Option<web_sys::Element> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.document_element())
    }
}

impl DisplayFlag for DocumentFlag {
    fn apply(&self, preference: Preference) {
        match Self::root() {
            Some(html) => {
                if html.set_attribute(&self.attribute, preference.as_str()).is_err() {
                    warn!("Failed to set {} on document element", self.attribute);
                }
            }
            None => warn!("No document element to apply {} to", preference),
        }

        for observer in self.observers.borrow().iter() {
            observer(preference);
        }
    }

    fn current(&self) -> Option<Preference> {
        Self::root()?
            .get_attribute(&self.attribute)?
            .parse()
            .ok()
    }
}
