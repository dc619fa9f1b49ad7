//! glint-block - delegating block proxy, port of the `glint-block` module.
//!
//! # Overview
//!
//! A [`Block`] stands in for a content block implementation that may be
//! attached later. Operations sent to it are records of the form
//! `[name, ...args]`: while no [`Delegate`] is attached they wait in a FIFO
//! queue, and attaching a delegate replays them in order. Named commands
//! (`load`, `edit`, `save`, `cancel`, `hasChanged`, `isValid`) are wrapped
//! with `pre-<name>` / `post-<name>` events and fall back to a default value
//! when the delegate fails; attribute accessors (`id`, `selector`, `el`,
//! `place`) emit an event named after the attribute.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use glint_block::{Block, BlockValue, ObjectDelegate, Outcome};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut block = Block::new();
//! let log = seen.clone();
//! block.on("pre-save", move |_, args| {
//!     log.borrow_mut().push(args.to_vec());
//!     Ok(())
//! });
//!
//! // Buffered: nothing to save to yet.
//! assert_eq!(block.save(&[BlockValue::from("draft")]).unwrap(), Outcome::This);
//!
//! let delegate = Rc::new(RefCell::new(
//!     ObjectDelegate::new().with_method("save", |props, args| {
//!         props.insert("saved".into(), args[0].clone());
//!         Ok(BlockValue::from(true))
//!     }),
//! ));
//! block.set_delegate(delegate.clone()).unwrap();
//!
//! assert_eq!(delegate.borrow().property("saved"), Some(&BlockValue::from("draft")));
//! assert_eq!(seen.borrow().len(), 1);
//! ```

pub mod block;
pub mod command;
pub mod delegate;
pub mod emitter;
pub mod error;
pub mod host;
pub mod mixin;
pub mod options;
pub mod queue;
pub mod types;

pub use block::Block;
pub use command::{Attribute, Command};
pub use delegate::{Delegate, DelegateRef, Method, ObjectDelegate, Properties};
pub use emitter::{Emitter, ListenerId};
pub use error::BlockError;
pub use host::{Dom, StaticDom};
pub use mixin::{Mixin, Mixins};
pub use options::BlockOptions;
pub use queue::{CommandQueue, Operation, Record};
pub use types::{BlockValue, Outcome};
