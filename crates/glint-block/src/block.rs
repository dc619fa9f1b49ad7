//! The delegating block proxy.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, error, trace};

use crate::command::{Attribute, Command};
use crate::delegate::DelegateRef;
use crate::emitter::{self, Emitter, ListenerId};
use crate::error::BlockError;
use crate::host::Dom;
use crate::mixin::{Mixin, Mixins};
use crate::options::BlockOptions;
use crate::queue::{CommandQueue, Operation, Record};
use crate::types::{BlockValue, Outcome};

/// Generates the typed named-command methods.
macro_rules! command_methods {
    ($($method:ident => $cmd:expr;)*) => {
        $(
            #[doc = concat!("Runs the `", stringify!($method), "` command. See [`Block::command`].")]
            pub fn $method(&mut self, args: &[BlockValue]) -> Result<Outcome, BlockError> {
                self.command($cmd, args)
            }
        )*
    };
}

/// Generates a getter and a chaining setter per attribute.
macro_rules! attribute_methods {
    ($($get:ident, $set:ident => $attr:expr;)*) => {
        $(
            #[doc = concat!("Reads `", stringify!($get), "`. See [`Block::attribute`].")]
            pub fn $get(&mut self) -> Result<Outcome, BlockError> {
                self.attribute($attr, None)
            }

            #[doc = concat!("Sets `", stringify!($get), "`. See [`Block::attribute`].")]
            pub fn $set(&mut self, value: impl Into<BlockValue>) -> Result<&mut Self, BlockError> {
                self.attribute($attr, Some(value.into()))?;
                Ok(self)
            }
        )*
    };
}

/// A proxy for a block implementation that may not exist yet.
///
/// Until a delegate is attached every forwarded operation is buffered;
/// attaching replays the buffer in order and later operations go straight
/// through. Named commands are wrapped with `pre-<name>` / `post-<name>`
/// events and never fail because of the delegate; attribute accessors emit an
/// event named after the attribute.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use glint_block::{Block, BlockValue, ObjectDelegate, Outcome};
///
/// let mut block = Block::new();
/// block.set_place("content").unwrap();
/// block.load(&[]).unwrap();
/// assert_eq!(block.pending().len(), 2);
///
/// let delegate = Rc::new(RefCell::new(
///     ObjectDelegate::new().with_method("load", |props, _| Ok(props["place"].clone())),
/// ));
/// block.set_delegate(delegate.clone()).unwrap();
/// assert!(block.pending().is_empty());
///
/// assert_eq!(block.load(&[]).unwrap(), Outcome::Value(BlockValue::from("content")));
/// ```
pub struct Block {
    queue: CommandQueue,
    delegate: Option<DelegateRef>,
    events: Emitter<Block>,
    mixins: Mixins,
    host: Option<Rc<dyn Dom>>,
    options: BlockOptions,
}

impl Block {
    /// Interface tag shared by all blocks.
    pub const API: &'static str = "block";

    pub fn new() -> Self {
        Self::with_options(BlockOptions::default())
    }

    pub fn with_options(options: BlockOptions) -> Self {
        let mut block = Block {
            queue: CommandQueue::new(),
            delegate: None,
            events: Emitter::new(),
            mixins: Mixins::default(),
            host: None,
            options,
        };
        block.init();
        block
    }

    /// Creates a block that forwards to `delegate` right away.
    pub fn from_delegate(delegate: DelegateRef) -> Self {
        let mut block = Self::new();
        // Nothing is buffered yet, so there is nothing to replay.
        block.delegate = Some(delegate);
        block
    }

    pub fn with_host(mut self, host: Rc<dyn Dom>) -> Self {
        self.host = Some(host);
        self
    }

    /// Installs or removes the DOM host. Without one the `selector` binding
    /// does nothing.
    pub fn set_host(&mut self, host: Option<Rc<dyn Dom>>) {
        self.host = host;
    }

    pub fn host(&self) -> Option<&Rc<dyn Dom>> {
        self.host.as_ref()
    }

    pub fn options(&self) -> &BlockOptions {
        &self.options
    }

    pub fn api(&self) -> &'static str {
        Self::API
    }

    /// Binds `selector` to `el`: a non-empty selector is looked up in the
    /// host DOM and the result forwarded as `el`.
    fn init(&mut self) {
        if !self.options.bind_selector {
            return;
        }
        self.events
            .on(Attribute::Selector.name(), |block: &mut Block, args: &[BlockValue]| {
                let Some(host) = block.host.clone() else {
                    return Ok(());
                };
                let selector = args.first().and_then(BlockValue::as_str).filter(|s| !s.is_empty());
                if let Some(selector) = selector {
                    let el = host.query_selector(selector);
                    block.send(Attribute::El.name(), vec![el])?;
                }
                Ok(())
            });
    }

    // ── Delegate ──────────────────────────────────────────────────────────

    /// The attached delegate, if any.
    pub fn delegate(&self) -> Option<DelegateRef> {
        self.delegate.clone()
    }

    /// Attaches `delegate` and replays the buffer against it, oldest first.
    ///
    /// If a replayed record fails the error is returned; that record is
    /// consumed and the records after it stay buffered.
    pub fn set_delegate(&mut self, delegate: DelegateRef) -> Result<&mut Self, BlockError> {
        self.delegate = Some(delegate);
        debug!(pending = self.queue.len(), "delegate attached");
        while let Some(record) = self.queue.pop() {
            self.exec(record)?;
        }
        Ok(self)
    }

    /// Detaches the delegate. Later operations are buffered again.
    pub fn undelegate(&mut self) {
        self.delegate = None;
    }

    pub fn is_buffering(&self) -> bool {
        self.delegate.is_none()
    }

    /// Operations waiting for a delegate.
    pub fn pending(&self) -> &CommandQueue {
        &self.queue
    }

    // ── Extension ─────────────────────────────────────────────────────────

    /// Runs `plugin` against this block.
    pub fn use_plugin<F>(&mut self, plugin: F) -> Result<&mut Self, BlockError>
    where
        F: FnOnce(&mut Block) -> Result<(), BlockError>,
    {
        plugin(self)?;
        Ok(self)
    }

    /// Installs members callable through [`Block::call`]. A mixin named after
    /// a command or attribute replaces the built-in one, also for the typed
    /// methods.
    pub fn mixin<I, K>(&mut self, mixins: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Mixin)>,
        K: Into<String>,
    {
        for (name, mixin) in mixins {
            self.mixins.insert(name, mixin);
        }
        self
    }

    /// Calls a member by name: mixins first, then the built-in commands and
    /// attribute accessors.
    pub fn call(&mut self, name: &str, args: &[BlockValue]) -> Result<Outcome, BlockError> {
        if let Some(mixin) = self.mixins.get(name) {
            return mixin.call(self, args);
        }
        if let Some(cmd) = Command::from_name(name) {
            return self.run_command(cmd, args);
        }
        if let Some(attr) = Attribute::from_name(name) {
            return self.run_attribute(attr, args.first().cloned());
        }
        Err(BlockError::NotCallable(name.to_string()))
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Subscribes to `event`. Listeners run synchronously with the block.
    pub fn on<F>(&mut self, event: impl Into<String>, listener: F) -> ListenerId
    where
        F: FnMut(&mut Block, &[BlockValue]) -> Result<(), BlockError> + 'static,
    {
        self.events.on(event, listener)
    }

    pub fn once<F>(&mut self, event: impl Into<String>, listener: F) -> ListenerId
    where
        F: FnMut(&mut Block, &[BlockValue]) -> Result<(), BlockError> + 'static,
    {
        self.events.once(event, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.events.listener_count(event)
    }

    /// Runs the listeners of `event` in subscription order and returns how
    /// many ran. The first listener error stops the emission and is returned.
    pub fn emit(&mut self, event: &str, args: &[BlockValue]) -> Result<usize, BlockError> {
        let listeners = self.events.snapshot(event);
        trace!(event = event, listeners = listeners.len(), "emit");
        emitter::dispatch(&listeners, self, event, args)
    }

    // ── Attributes ────────────────────────────────────────────────────────

    /// Gets or sets an attribute.
    ///
    /// The attribute event is emitted first, carrying the value (`undefined`
    /// for a read). A set then forwards `[attr, value]` and returns
    /// [`Outcome::This`]; a read forwards `[attr]` and returns its outcome.
    /// Errors are not caught.
    pub fn attribute(&mut self, attr: Attribute, value: Option<BlockValue>) -> Result<Outcome, BlockError> {
        let args: Vec<BlockValue> = value.into_iter().collect();
        self.call(attr.name(), &args)
    }

    fn run_attribute(&mut self, attr: Attribute, value: Option<BlockValue>) -> Result<Outcome, BlockError> {
        let value = value.filter(|v| !v.is_undefined());
        self.emit(attr.name(), &[value.clone().unwrap_or_default()])?;
        match value {
            Some(value) => {
                self.send(attr.name(), vec![value])?;
                Ok(Outcome::This)
            }
            None => self.send(attr.name(), Vec::new()),
        }
    }

    attribute_methods! {
        id, set_id => Attribute::Id;
        selector, set_selector => Attribute::Selector;
        el, set_el => Attribute::El;
        place, set_place => Attribute::Place;
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Runs a named command.
    ///
    /// Emits `pre-<name>` with `args`, forwards `[name, ...args]`, then emits
    /// `post-<name>` with `args`. The events fire even when the command is
    /// only buffered. A forwarding error is logged and replaced by the first
    /// argument if it is truthy, else by [`BlockOptions::error_fallback`].
    /// Listener errors still propagate.
    pub fn command(&mut self, cmd: Command, args: &[BlockValue]) -> Result<Outcome, BlockError> {
        self.call(cmd.name(), args)
    }

    fn run_command(&mut self, cmd: Command, args: &[BlockValue]) -> Result<Outcome, BlockError> {
        self.emit(&cmd.pre_event(), args)?;
        let result = match self.send(cmd.name(), args.to_vec()) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(command = cmd.name(), error = %err, "block command was not successful");
                let fallback = args
                    .first()
                    .filter(|arg| arg.is_truthy())
                    .cloned()
                    .unwrap_or_else(|| BlockValue::from(self.options.error_fallback.clone()));
                Outcome::Value(fallback)
            }
        };
        self.emit(&cmd.post_event(), args)?;
        Ok(result)
    }

    command_methods! {
        load => Command::Load;
        edit => Command::Edit;
        save => Command::Save;
        cancel => Command::Cancel;
        has_changed => Command::HasChanged;
        is_valid => Command::IsValid;
    }

    // ── Forwarding ────────────────────────────────────────────────────────

    /// Forwards `[command, ...args]`: buffered (returning [`Outcome::This`])
    /// while no delegate is attached, executed immediately otherwise.
    pub fn send(&mut self, command: &str, args: Vec<BlockValue>) -> Result<Outcome, BlockError> {
        let record = Record::new(command, args);
        if self.delegate.is_none() {
            self.queue.push(record);
            debug!(command = command, pending = self.queue.len(), "buffered");
            return Ok(Outcome::This);
        }
        self.exec(record)
    }

    /// Executes a record against the delegate.
    ///
    /// A callable member is invoked with the arguments and its result
    /// returned. Otherwise the first argument, if any, is assigned to the
    /// member and [`Outcome::This`] returned; with no arguments the member's
    /// value is returned.
    pub fn exec(&self, record: Record) -> Result<Outcome, BlockError> {
        let delegate = self.delegate.as_ref().ok_or(BlockError::NoDelegate)?;
        let mut target = delegate.try_borrow_mut().map_err(|_| BlockError::DelegateBusy)?;
        let callable = target.is_callable(&record.command);
        let outcome = match record.resolve(callable) {
            Operation::Invoke { name, args } => Outcome::Value(target.call(&name, &args)?),
            Operation::Write { name, value } => {
                target.set(&name, value);
                Outcome::This
            }
            Operation::Read { name } => Outcome::Value(target.get(&name)),
        };
        Ok(outcome)
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("pending", &self.queue)
            .field("delegated", &self.delegate.is_some())
            .field("mixins", &self.mixins)
            .field("dom", &self.host.is_some())
            .field("options", &self.options)
            .finish()
    }
}
