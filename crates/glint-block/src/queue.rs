//! Buffered operations and their resolution against a delegate.
//!
//! Operations sent while no delegate is attached are appended to a
//! [`CommandQueue`]. Attaching a delegate drains the queue front to back, so
//! every record runs exactly once and in the order it was sent.

use std::collections::VecDeque;

use crate::types::BlockValue;

/// One forwarded operation: a member name followed by its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub command: String,
    pub args: Vec<BlockValue>,
}

impl Record {
    pub fn new(command: impl Into<String>, args: Vec<BlockValue>) -> Self {
        Record {
            command: command.into(),
            args,
        }
    }

    /// Resolves the record into an [`Operation`], given whether the delegate
    /// exposes `command` as an invocable member.
    pub fn resolve(self, callable: bool) -> Operation {
        let Record { command, args } = self;
        if callable {
            return Operation::Invoke {
                name: command,
                args,
            };
        }
        match args.into_iter().next() {
            Some(value) => Operation::Write {
                name: command,
                value,
            },
            None => Operation::Read { name: command },
        }
    }
}

/// A record resolved against a specific delegate.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Call a method with the arguments.
    Invoke { name: String, args: Vec<BlockValue> },
    /// Assign the first argument to a property; later arguments are dropped.
    Write { name: String, value: BlockValue },
    /// Read a property.
    Read { name: String },
}

impl Operation {
    pub fn name(&self) -> &str {
        match self {
            Operation::Invoke { name, .. }
            | Operation::Write { name, .. }
            | Operation::Read { name } => name,
        }
    }
}

/// FIFO buffer of records waiting for a delegate.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    records: VecDeque<Record>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push_back(record);
    }

    /// Removes the oldest record.
    pub fn pop(&mut self) -> Option<Record> {
        self.records.pop_front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates pending records oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}
