//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use glint_block::{BlockError, BlockValue, Delegate};

/// A delegate that writes every operation it sees to a timeline.
///
/// Listeners in the tests append to the same timeline, so the relative order
/// of events and delegate calls can be asserted directly.
#[derive(Debug, Default)]
pub struct Tape {
    pub methods: HashSet<String>,
    pub failing: HashSet<String>,
    pub props: HashMap<String, BlockValue>,
    pub log: Vec<String>,
}

impl Tape {
    /// A tape exposing the six named commands as methods.
    pub fn with_commands() -> Self {
        Self::with_methods(&["load", "edit", "save", "cancel", "hasChanged", "isValid"])
    }

    pub fn with_methods(names: &[&str]) -> Self {
        Tape {
            methods: names.iter().map(|n| n.to_string()).collect(),
            ..Tape::default()
        }
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.methods.insert(name.to_string());
        self.failing.insert(name.to_string());
        self
    }

    pub fn prop(mut self, name: &str, value: impl Into<BlockValue>) -> Self {
        self.props.insert(name.to_string(), value.into());
        self
    }

    pub fn shared(self) -> Rc<RefCell<Tape>> {
        Rc::new(RefCell::new(self))
    }
}

impl Delegate for Tape {
    fn is_callable(&self, name: &str) -> bool {
        self.methods.contains(name)
    }

    fn call(&mut self, name: &str, args: &[BlockValue]) -> Result<BlockValue, BlockError> {
        self.log.push(format!("call {}({})", name, fmt_args(args)));
        if self.failing.contains(name) {
            return Err(BlockError::thrown(format!("{} exploded", name)));
        }
        Ok(BlockValue::from(format!("{}:ok", name)))
    }

    fn get(&self, name: &str) -> BlockValue {
        self.props.get(name).cloned().unwrap_or_default()
    }

    fn set(&mut self, name: &str, value: BlockValue) {
        self.log.push(format!("set {}={}", name, fmt_value(&value)));
        self.props.insert(name.to_string(), value);
    }
}

pub fn fmt_value(value: &BlockValue) -> String {
    match value {
        BlockValue::Undefined => "undefined".to_string(),
        BlockValue::Json(v) => v.to_string(),
    }
}

pub fn fmt_args(args: &[BlockValue]) -> String {
    args.iter().map(fmt_value).collect::<Vec<_>>().join(",")
}
