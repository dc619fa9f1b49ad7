//! Synchronous publish/subscribe channel.
//!
//! Listeners are keyed by event name and run in subscription order. The
//! channel is generic over the context handed to each listener so that its
//! owner can pass itself in (a block's listeners receive `&mut Block`).
//!
//! Emission works on a snapshot: [`Emitter::snapshot`] returns the listeners
//! registered at that moment and drops `once` listeners from the table before
//! any of them runs. Listeners added or removed while an emission is in
//! progress only affect later emissions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::BlockError;
use crate::types::BlockValue;

/// Handle returned by [`Emitter::on`] and [`Emitter::once`], used to
/// unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener<C> = Rc<RefCell<dyn FnMut(&mut C, &[BlockValue]) -> Result<(), BlockError>>>;

struct Entry<C> {
    id: ListenerId,
    once: bool,
    listener: Listener<C>,
}

pub struct Emitter<C> {
    listeners: HashMap<String, Vec<Entry<C>>>,
    next_id: u64,
}

impl<C> Emitter<C> {
    pub fn new() -> Self {
        Emitter {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    /// Subscribes `listener` to `event`.
    pub fn on<F>(&mut self, event: impl Into<String>, listener: F) -> ListenerId
    where
        F: FnMut(&mut C, &[BlockValue]) -> Result<(), BlockError> + 'static,
    {
        self.add(event.into(), false, Rc::new(RefCell::new(listener)))
    }

    /// Subscribes `listener` for the next emission of `event` only.
    pub fn once<F>(&mut self, event: impl Into<String>, listener: F) -> ListenerId
    where
        F: FnMut(&mut C, &[BlockValue]) -> Result<(), BlockError> + 'static,
    {
        self.add(event.into(), true, Rc::new(RefCell::new(listener)))
    }

    fn add(&mut self, event: String, once: bool, listener: Listener<C>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event)
            .or_default()
            .push(Entry { id, once, listener });
        id
    }

    /// Removes a listener. Returns `false` if it was not subscribed.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let mut emptied = None;
        let mut found = false;
        for (event, entries) in self.listeners.iter_mut() {
            if let Some(pos) = entries.iter().position(|e| e.id == id) {
                entries.remove(pos);
                found = true;
                if entries.is_empty() {
                    emptied = Some(event.clone());
                }
                break;
            }
        }
        if let Some(event) = emptied {
            self.listeners.remove(&event);
        }
        found
    }

    /// Removes every listener of `event`, or of all events when `None`.
    pub fn clear(&mut self, event: Option<&str>) {
        match event {
            Some(event) => {
                self.listeners.remove(event);
            }
            None => self.listeners.clear(),
        }
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }

    /// Events with at least one listener, in no particular order.
    pub fn event_names(&self) -> Vec<&str> {
        self.listeners.keys().map(String::as_str).collect()
    }

    /// Listeners to run for one emission of `event`, in subscription order.
    ///
    /// `once` listeners are removed from the table by this call.
    pub fn snapshot(&mut self, event: &str) -> Vec<Listener<C>> {
        let Some(entries) = self.listeners.get_mut(event) else {
            return Vec::new();
        };
        let snapshot = entries.iter().map(|e| Rc::clone(&e.listener)).collect();
        entries.retain(|e| !e.once);
        if entries.is_empty() {
            self.listeners.remove(event);
        }
        snapshot
    }

    /// Runs the listeners of `event` against `ctx`, stopping at the first
    /// error. Returns how many listeners ran.
    ///
    /// Use this when the context is not the emitter's owner; an owner that
    /// passes itself as context must take a [`snapshot`](Self::snapshot)
    /// first and call the listeners itself.
    pub fn emit(&mut self, ctx: &mut C, event: &str, args: &[BlockValue]) -> Result<usize, BlockError> {
        let listeners = self.snapshot(event);
        dispatch(&listeners, ctx, event, args)
    }
}

impl<C> Default for Emitter<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Calls `listeners` in order with `ctx`.
///
/// A listener that is still running further up the stack (a recursive
/// emission reached it again) fails with [`BlockError::ListenerBusy`].
pub fn dispatch<C>(
    listeners: &[Listener<C>],
    ctx: &mut C,
    event: &str,
    args: &[BlockValue],
) -> Result<usize, BlockError> {
    let mut fired = 0;
    for listener in listeners {
        let mut listener = listener
            .try_borrow_mut()
            .map_err(|_| BlockError::ListenerBusy(event.to_string()))?;
        (&mut *listener)(ctx, args)?;
        fired += 1;
    }
    Ok(fired)
}
