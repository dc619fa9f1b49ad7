//! Caller supplied members that extend or override a block's API.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::block::Block;
use crate::error::BlockError;
use crate::types::{BlockValue, Outcome};

type MixinFn = dyn Fn(&mut Block, &[BlockValue]) -> Result<Outcome, BlockError>;

/// A member installed with [`Block::mixin`]. Receives the block it was
/// called on.
#[derive(Clone)]
pub struct Mixin(Rc<MixinFn>);

impl Mixin {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Block, &[BlockValue]) -> Result<Outcome, BlockError> + 'static,
    {
        Mixin(Rc::new(f))
    }

    pub fn call(&self, block: &mut Block, args: &[BlockValue]) -> Result<Outcome, BlockError> {
        (self.0)(block, args)
    }
}

impl fmt::Debug for Mixin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mixin(..)")
    }
}

/// Override table consulted before a block's built-in members.
#[derive(Debug, Clone, Default)]
pub struct Mixins {
    members: HashMap<String, Mixin>,
}

impl Mixins {
    /// Installs `mixin` under `name`, replacing any earlier one.
    pub fn insert(&mut self, name: impl Into<String>, mixin: Mixin) {
        self.members.insert(name.into(), mixin);
    }

    /// Cheap clone of the member, so it can be called with the block
    /// borrowed mutably.
    pub fn get(&self, name: &str) -> Option<Mixin> {
        self.members.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
