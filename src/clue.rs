//! Human readable clues for failures.
use serde_json::Value;

use crate::failure::{Failure, FailureKind};

pub fn render_clue(value: Option<&Value>, failure: &Failure) -> String {
    let v = display_value(value);
    let key = failure.key.as_ref()
        .map(|k| format!(" for key \"{k}\""))
        .unwrap_or_default();
    let opt = if failure.optional { " optional" } else { "" };

    match &failure.kind {
        FailureKind::Custom { error_message: Some(message) } => {
            format!("Custom validator failed for value \"{v}\"{key}: \"{message}\"")
        }
        FailureKind::Custom { error_message: None } => {
            format!("Custom validator failed for value \"{v}\"{key}.")
        }
        FailureKind::Equals { expected } => {
            format!("The given value \"{v}\" did not strictly equal \"{}\"{key}.", display_value(Some(expected)))
        }
        FailureKind::OneOf { validators } => {
            format!("The given value \"{v}\" did not pass one of the {validators} given validators{key}.")
        }
        FailureKind::Every { validators } => {
            format!("The given value \"{v}\" did not pass every one of the {validators} given validators{key}.")
        }
        FailureKind::NativeType { expected, got } => format!("Expected{opt} {expected}{key}, got {got}."),
        FailureKind::InstanceOf { expected, got, .. } => format!("Expected{opt} instance of {expected}{key}, got {got}."),
        FailureKind::ArrayLiteral { got } => format!("Expected{opt} array{key}, got {got}."),
        FailureKind::ObjectLiteral { got } => format!("Expected{opt} object{key}, got {got}."),
        FailureKind::UnknownKey { key: unknown } => format!("Unexpected key \"{unknown}\" in object literal{key}."),
    }
}

/// Strings raw, absence as `undefined`, everything else as compact JSON.
fn display_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// -------------------------------- Tests ----------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::DataType;
    use crate::validator::Kind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn failure(kind: FailureKind) -> Failure { Failure::new(kind) }

    #[test]
    fn native_type() {
        let f = failure(FailureKind::NativeType { expected: Kind::String, got: DataType::Number });
        assert_eq!(render_clue(Some(&json!(5)), &f), "Expected string, got number.");
    }

    #[test]
    fn optional_and_key_qualifiers() {
        let mut f = failure(FailureKind::ArrayLiteral { got: DataType::Boolean });
        f.optional = true;
        f.add_key("tags");
        assert_eq!(
            render_clue(Some(&json!(true)), &f),
            "Expected optional array for key \"tags\", got boolean."
        );
    }

    #[test]
    fn wrapper_clues_interpolate_the_value() {
        let f = failure(FailureKind::Equals { expected: json!("on") });
        assert_eq!(render_clue(Some(&json!("off")), &f), "The given value \"off\" did not strictly equal \"on\".");

        let f = failure(FailureKind::OneOf { validators: 3 });
        assert_eq!(render_clue(Some(&json!([1])), &f), "The given value \"[1]\" did not pass one of the 3 given validators.");

        let f = failure(FailureKind::Every { validators: 2 });
        assert_eq!(render_clue(None, &f), "The given value \"undefined\" did not pass every one of the 2 given validators.");
    }

    #[test]
    fn custom_with_and_without_message() {
        let f = failure(FailureKind::Custom { error_message: None });
        assert_eq!(render_clue(Some(&json!(-1)), &f), "Custom validator failed for value \"-1\".");

        let mut f = failure(FailureKind::Custom { error_message: Some("too small".into()) });
        f.add_key("size");
        assert_eq!(
            render_clue(Some(&json!(-1)), &f),
            "Custom validator failed for value \"-1\" for key \"size\": \"too small\""
        );
    }

    #[test]
    fn instance_of_and_unknown_key() {
        let f = failure(FailureKind::InstanceOf { expected: "Point".into(), got: DataType::Array, detail: None });
        assert_eq!(render_clue(Some(&json!([])), &f), "Expected instance of Point, got array.");

        let f = failure(FailureKind::UnknownKey { key: "z".into() });
        assert_eq!(render_clue(Some(&json!({"z": 1})), &f), "Unexpected key \"z\" in object literal.");

        let f = failure(FailureKind::ObjectLiteral { got: DataType::Undefined });
        assert_eq!(render_clue(None, &f), "Expected object, got undefined.");
    }
}
