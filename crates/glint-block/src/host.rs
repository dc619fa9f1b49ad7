//! DOM access of the host environment.
//!
//! A block only needs one DOM capability: resolving a CSS selector to an
//! element when its `selector` attribute is set. Hosts without a DOM simply
//! don't install one.

use indexmap::IndexMap;
use serde_json::Value;

use crate::types::BlockValue;

/// `document.querySelector` of the host environment.
pub trait Dom {
    /// Returns the first element matching `selector`, or JSON `null` when
    /// nothing matches.
    fn query_selector(&self, selector: &str) -> BlockValue;
}

/// A fixed selector to element table.
///
/// Elements are opaque JSON descriptions; lookups match the selector string
/// exactly.
#[derive(Debug, Clone, Default)]
pub struct StaticDom {
    elements: IndexMap<String, Value>,
}

impl StaticDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, selector: impl Into<String>, element: Value) -> Self {
        self.insert(selector, element);
        self
    }

    pub fn insert(&mut self, selector: impl Into<String>, element: Value) {
        self.elements.insert(selector.into(), element);
    }
}

impl Dom for StaticDom {
    fn query_selector(&self, selector: &str) -> BlockValue {
        BlockValue::Json(self.elements.get(selector).cloned().unwrap_or(Value::Null))
    }
}
