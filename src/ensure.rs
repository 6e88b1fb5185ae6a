//! Entry points over [`check`]: boolean and error-raising.
use serde_json::Value;

use crate::check::check;
use crate::clue::render_clue;
use crate::error::ValidationError;
use crate::failure::Failure;
use crate::validator::Validator;

/// Whether `value` conforms to `validator`.
pub fn passes(value: &Value, validator: &Validator) -> bool {
    check(value, validator).is_ok()
}

/// Raise a [`ValidationError`] when `value` does not conform.
///
/// The message is `validation failed. <clue>`.
pub fn ensure(value: &Value, validator: &Validator) -> Result<(), ValidationError> {
    ensure_with(value, validator, |_, _| String::new())
}

/// Like [`ensure`], with a caller-supplied message built from the value and
/// the failure. An empty message falls back to the default one.
pub fn ensure_with<F, M>(value: &Value, validator: &Validator, custom: F) -> Result<(), ValidationError>
where
    F: FnOnce(&Value, &Failure) -> M,
    M: Into<String>,
{
    let Err(failure) = check(value, validator) else {
        return Ok(());
    };
    let clue = render_clue(failure.locate(value), &failure);
    let message: String = custom(value, &failure).into();
    let message = if message.is_empty() { format!("validation failed. {clue}") } else { message };
    tracing::debug!(kind = failure.tag(), path = %failure.path_string(), "{clue}");
    Err(ValidationError { message, clue, failure })
}

// -------------------------------- Tests ----------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::Kind;
    use crate::wrapper::{optional, validate};
    use serde_json::json;

    #[test]
    fn passes_is_boolean_check() {
        assert!(passes(&json!("x"), &Kind::String.into()));
        assert!(!passes(&json!(5), &Kind::String.into()));
    }

    #[test]
    fn ensure_message_carries_the_clue() {
        let err = ensure(&json!(5), &Kind::String.into()).unwrap_err();
        assert_eq!(err.message, "validation failed. Expected string, got number.");
        assert_eq!(err.to_string(), "shapecheck: validation failed. Expected string, got number.");
        assert!(ensure(&json!("x"), &Kind::String.into()).is_ok());
    }

    #[test]
    fn clue_interpolates_the_failing_leaf() {
        let v = Validator::object([("size", validate(|v: &Value| v.as_i64().is_some_and(|n| n > 0)))]);
        let err = ensure(&json!({"size": -3}), &v).unwrap_err();
        assert_eq!(err.clue, "Custom validator failed for value \"-3\" for key \"size\".");
    }

    #[test]
    fn custom_message() {
        let v = Validator::object([("port", optional(Kind::Integer))]);
        let err = ensure_with(&json!({"port": "80"}), &v, |_, failure| {
            format!("bad config at {}", failure.path_string())
        })
        .unwrap_err();
        assert_eq!(err.message, "bad config at $.port");
        assert_eq!(err.clue, "Expected optional integer for key \"port\", got string.");
    }

    #[test]
    fn empty_custom_message_falls_back() {
        let err = ensure_with(&json!(1), &Kind::Null.into(), |_, _| "").unwrap_err();
        assert_eq!(err.message, "validation failed. Expected null, got number.");
    }
}
