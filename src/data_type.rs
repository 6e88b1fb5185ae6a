//! Data-type classifier.
//!
//! Like a plain `typeof`, but arrays, `null` and absent properties each get
//! their own class instead of collapsing into "object".
use std::fmt;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// property not present on its parent object
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl DataType {
    /// Classify a value; `None` is an absent property.
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => DataType::Undefined,
            Some(Value::Null) => DataType::Null,
            Some(Value::Bool(_)) => DataType::Boolean,
            Some(Value::Number(_)) => DataType::Number,
            Some(Value::String(_)) => DataType::String,
            Some(Value::Array(_)) => DataType::Array,
            Some(Value::Object(_)) => DataType::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Undefined => "undefined",
            DataType::Null => "null",
            DataType::Boolean => "boolean",
            DataType::Number => "number",
            DataType::String => "string",
            DataType::Array => "array",
            DataType::Object => "object",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -------------------------------- Tests ----------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn arrays_are_not_objects() {
        assert_eq!(DataType::of(Some(&json!([1, 2]))), DataType::Array);
        assert_eq!(DataType::of(Some(&json!({"a": 1}))), DataType::Object);
    }

    #[test]
    fn null_and_absence_are_distinct() {
        assert_eq!(DataType::of(Some(&Value::Null)), DataType::Null);
        assert_eq!(DataType::of(None), DataType::Undefined);
        assert_eq!(DataType::Undefined.to_string(), "undefined");
    }

    #[test]
    fn scalars() {
        assert_eq!(DataType::of(Some(&json!("x"))), DataType::String);
        assert_eq!(DataType::of(Some(&json!(1.5))), DataType::Number);
        assert_eq!(DataType::of(Some(&json!(false))), DataType::Boolean);
    }

    proptest! {
        #[test]
        fn display_matches_serialized_name(n in any::<i64>(), s in ".*", b in any::<bool>()) {
            for v in [json!(n), json!(s), json!(b), Value::Null, json!([]), json!({})] {
                let t = DataType::of(Some(&v));
                let as_json = serde_json::to_value(t).unwrap();
                prop_assert_eq!(as_json, json!(t.to_string()));
            }
        }
    }
}
