use serde::Deserialize;

use crate::error::BlockError;

/// Options for [`Block`](crate::Block).
///
/// # Example
///
/// ```
/// use glint_block::BlockOptions;
///
/// let opts = BlockOptions::from_json(r#"{"bind_selector": false}"#).unwrap();
/// assert!(!opts.bind_selector);
/// assert_eq!(opts.error_fallback, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlockOptions {
    /// Forward the element found for a new `selector` as `el`. Default is
    /// `true`.
    pub bind_selector: bool,
    /// Returned by a failed command when it got no truthy first argument.
    /// Default is the empty string.
    pub error_fallback: String,
}

impl Default for BlockOptions {
    fn default() -> Self {
        Self {
            bind_selector: true,
            error_fallback: String::new(),
        }
    }
}

impl BlockOptions {
    pub fn from_json(json: &str) -> Result<Self, BlockError> {
        serde_json::from_str(json).map_err(|e| BlockError::InvalidOptions(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = BlockOptions::default();
        assert!(opts.bind_selector);
        assert!(opts.error_fallback.is_empty());
        assert_eq!(BlockOptions::from_json("{}").unwrap(), opts);
    }

    #[test]
    fn test_partial_json() {
        let opts = BlockOptions::from_json(r#"{"error_fallback": "n/a"}"#).unwrap();
        assert!(opts.bind_selector);
        assert_eq!(opts.error_fallback, "n/a");
    }

    #[test]
    fn test_invalid_json() {
        let err = BlockOptions::from_json(r#"{"bind_selector": "yes"}"#).unwrap_err();
        assert!(matches!(err, BlockError::InvalidOptions(_)));
    }
}
