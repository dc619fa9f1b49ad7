//! The backing implementation a block forwards to.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::BlockError;
use crate::types::BlockValue;

/// Shared handle to a delegate. The block holds it but never owns the
/// delegate's lifetime.
pub type DelegateRef = Rc<RefCell<dyn Delegate>>;

/// Capability interface of a block implementation.
///
/// A member is either invocable (a method) or a property slot. Records sent
/// to a block are resolved with [`Delegate::is_callable`] when they execute.
pub trait Delegate {
    /// Whether `name` is an invocable member.
    fn is_callable(&self, name: &str) -> bool;

    /// Invokes the method `name`. Only called when `is_callable(name)`.
    fn call(&mut self, name: &str, args: &[BlockValue]) -> Result<BlockValue, BlockError>;

    /// Reads property `name`; missing members read as `undefined`.
    fn get(&self, name: &str) -> BlockValue;

    /// Assigns property `name`.
    fn set(&mut self, name: &str, value: BlockValue);
}

/// Property slots of an [`ObjectDelegate`], in insertion order.
pub type Properties = IndexMap<String, BlockValue>;

/// Method of an [`ObjectDelegate`]. Receives the delegate's properties in
/// place of a receiver.
pub type Method = Box<dyn FnMut(&mut Properties, &[BlockValue]) -> Result<BlockValue, BlockError>>;

/// A delegate assembled from a table of methods and properties.
///
/// # Example
///
/// ```
/// use glint_block::{BlockValue, Delegate, ObjectDelegate};
///
/// let mut delegate = ObjectDelegate::new()
///     .with_method("load", |props, _args| Ok(props.get("id").cloned().unwrap_or_default()))
///     .with_property("id", "intro");
///
/// assert!(delegate.is_callable("load"));
/// assert_eq!(delegate.call("load", &[]).unwrap(), BlockValue::from("intro"));
/// ```
#[derive(Default)]
pub struct ObjectDelegate {
    methods: HashMap<String, Method>,
    properties: Properties,
}

impl ObjectDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: FnMut(&mut Properties, &[BlockValue]) -> Result<BlockValue, BlockError> + 'static,
    {
        self.insert_method(name, method);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<BlockValue>) -> Self {
        self.set(&name.into(), value.into());
        self
    }

    /// Installs a method, shadowing a property of the same name.
    pub fn insert_method<F>(&mut self, name: impl Into<String>, method: F)
    where
        F: FnMut(&mut Properties, &[BlockValue]) -> Result<BlockValue, BlockError> + 'static,
    {
        let name = name.into();
        self.properties.shift_remove(&name);
        self.methods.insert(name, Box::new(method));
    }

    pub fn property(&self, name: &str) -> Option<&BlockValue> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }
}

impl Delegate for ObjectDelegate {
    fn is_callable(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    fn call(&mut self, name: &str, args: &[BlockValue]) -> Result<BlockValue, BlockError> {
        let method = self
            .methods
            .get_mut(name)
            .ok_or_else(|| BlockError::NotCallable(name.to_string()))?;
        method(&mut self.properties, args)
    }

    fn get(&self, name: &str) -> BlockValue {
        self.properties.get(name).cloned().unwrap_or_default()
    }

    /// Assigning over a method replaces it with the property.
    fn set(&mut self, name: &str, value: BlockValue) {
        self.methods.remove(name);
        self.properties.insert(name.to_string(), value);
    }
}

impl fmt::Debug for ObjectDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&String> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("ObjectDelegate")
            .field("methods", &methods)
            .field("properties", &self.properties)
            .finish()
    }
}
