use thiserror::Error;

/// Errors raised while forwarding operations to a block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// Dynamic dispatch found no mixin, command or accessor with this name.
    #[error("\"{0}\" is not a function")]
    NotCallable(String),

    /// `exec` was called while no delegate is attached.
    #[error("NO_DELEGATE")]
    NoDelegate,

    /// The delegate is already borrowed further up the call stack.
    #[error("DELEGATE_BUSY")]
    DelegateBusy,

    /// A listener was re-entered by a recursive emission of the same event.
    #[error("listener for \"{0}\" is already running")]
    ListenerBusy(String),

    /// Failure raised by a delegate member, plugin, mixin or listener.
    #[error("{0}")]
    Thrown(String),

    #[error("invalid block options: {0}")]
    InvalidOptions(String),
}

impl BlockError {
    /// Shorthand for [`BlockError::Thrown`].
    pub fn thrown(message: impl Into<String>) -> Self {
        BlockError::Thrown(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            BlockError::NotCallable("foo".into()).to_string(),
            "\"foo\" is not a function"
        );
        assert_eq!(BlockError::NoDelegate.to_string(), "NO_DELEGATE");
        assert_eq!(BlockError::thrown("boom").to_string(), "boom");
        assert_eq!(
            BlockError::ListenerBusy("selector".into()).to_string(),
            "listener for \"selector\" is already running"
        );
    }
}
