use serde_json::Value;

/// A dynamic value passed to and returned from block operations.
///
/// JSON has no `undefined`, but a block needs one: an accessor called without
/// a value is a read, and a missing delegate member reads as `undefined`
/// rather than `null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BlockValue {
    /// JavaScript `undefined`.
    #[default]
    Undefined,
    /// Any JSON-compatible value.
    Json(Value),
}

impl BlockValue {
    pub fn is_undefined(&self) -> bool {
        matches!(self, BlockValue::Undefined)
    }

    /// JavaScript truthiness: `undefined`, `null`, `false`, `0`, `NaN` and
    /// `""` are falsy, everything else (including empty arrays and objects)
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            BlockValue::Undefined => false,
            BlockValue::Json(Value::Null) => false,
            BlockValue::Json(Value::Bool(b)) => *b,
            BlockValue::Json(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            BlockValue::Json(Value::String(s)) => !s.is_empty(),
            BlockValue::Json(Value::Array(_)) | BlockValue::Json(Value::Object(_)) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            BlockValue::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            BlockValue::Json(v) => Some(v),
            BlockValue::Undefined => None,
        }
    }

    /// Converts to JSON, mapping `undefined` to `null`.
    pub fn into_json(self) -> Value {
        match self {
            BlockValue::Json(v) => v,
            BlockValue::Undefined => Value::Null,
        }
    }
}

impl From<Value> for BlockValue {
    fn from(v: Value) -> Self {
        BlockValue::Json(v)
    }
}

impl From<Option<Value>> for BlockValue {
    fn from(v: Option<Value>) -> Self {
        v.map(BlockValue::Json).unwrap_or(BlockValue::Undefined)
    }
}

impl From<bool> for BlockValue {
    fn from(b: bool) -> Self {
        BlockValue::Json(Value::Bool(b))
    }
}

impl From<i64> for BlockValue {
    fn from(n: i64) -> Self {
        BlockValue::Json(Value::Number(n.into()))
    }
}

impl From<f64> for BlockValue {
    fn from(n: f64) -> Self {
        BlockValue::Json(serde_json::json!(n))
    }
}

impl From<String> for BlockValue {
    fn from(s: String) -> Self {
        BlockValue::Json(Value::String(s))
    }
}

impl From<&str> for BlockValue {
    fn from(s: &str) -> Self {
        BlockValue::Json(Value::String(s.to_string()))
    }
}

/// What a forwarded operation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The block itself: the operation was buffered, was a property write,
    /// or was an attribute set. Callers keep chaining on the block.
    This,
    /// A value produced by the delegate.
    Value(BlockValue),
}

impl Outcome {
    pub fn is_this(&self) -> bool {
        matches!(self, Outcome::This)
    }

    pub fn value(&self) -> Option<&BlockValue> {
        match self {
            Outcome::Value(v) => Some(v),
            Outcome::This => None,
        }
    }

    /// Returns the produced value, or `undefined` for [`Outcome::This`].
    pub fn into_value(self) -> BlockValue {
        match self {
            Outcome::Value(v) => v,
            Outcome::This => BlockValue::Undefined,
        }
    }
}

impl From<BlockValue> for Outcome {
    fn from(v: BlockValue) -> Self {
        Outcome::Value(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!BlockValue::Undefined.is_truthy());
        assert!(!BlockValue::from(json!(null)).is_truthy());
        assert!(!BlockValue::from(false).is_truthy());
        assert!(!BlockValue::from(0).is_truthy());
        assert!(!BlockValue::from(0.0).is_truthy());
        assert!(!BlockValue::from("").is_truthy());

        assert!(BlockValue::from(true).is_truthy());
        assert!(BlockValue::from(-1).is_truthy());
        assert!(BlockValue::from("0").is_truthy());
        assert!(BlockValue::from(json!([])).is_truthy());
        assert!(BlockValue::from(json!({})).is_truthy());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(BlockValue::from(None::<Value>), BlockValue::Undefined);
        assert_eq!(BlockValue::from(Some(json!(1))), BlockValue::from(1));
    }

    #[test]
    fn test_into_json() {
        assert_eq!(BlockValue::Undefined.into_json(), Value::Null);
        assert_eq!(BlockValue::from("x").into_json(), json!("x"));
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(Outcome::This.is_this());
        assert_eq!(Outcome::This.value(), None);
        assert_eq!(Outcome::This.into_value(), BlockValue::Undefined);

        let out = Outcome::from(BlockValue::from("ok"));
        assert!(!out.is_this());
        assert_eq!(out.value().and_then(BlockValue::as_str), Some("ok"));
    }
}
