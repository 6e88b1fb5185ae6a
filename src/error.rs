use thiserror::Error;

use crate::failure::Failure;

/// Misuse of the library, as opposed to a value that does not conform.
#[derive(Debug, Error)]
pub enum Error {
    #[error("shapecheck: invalid use{}: {message}", at_path(.path))]
    InvalidUse {
        /// location inside a descriptor, when the validator came from one
        path: Option<String>,
        message: String,
    },
    #[error("shapecheck: failed to parse JSON validator: {0}")]
    Json(#[from] serde_json::Error),
    #[error("shapecheck: failed to parse YAML validator: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A value failed its validator.
///
/// Raised by [`crate::ensure`]. Returning it from a [`crate::validate`]
/// predicate turns it into a `wrapper.validator` failure carrying `message`.
#[derive(Debug, Clone, Error)]
#[error("shapecheck: {message}")]
pub struct ValidationError {
    pub message: String,
    pub clue: String,
    pub failure: Failure,
}

impl Error {
    pub(crate) fn invalid_use(message: impl Into<String>) -> Self {
        Error::InvalidUse { path: None, message: message.into() }
    }

    pub(crate) fn invalid_use_at(path: &str, message: impl Into<String>) -> Self {
        Error::InvalidUse { path: Some(path.to_string()), message: message.into() }
    }
}

fn at_path(path: &Option<String>) -> String {
    path.as_ref().map(|p| format!(" at {p}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_use_mentions_path_when_known() {
        assert_eq!(
            Error::invalid_use("every() expects at least one validator").to_string(),
            "shapecheck: invalid use: every() expects at least one validator"
        );
        assert_eq!(
            Error::invalid_use_at("$.a", "invalid validator").to_string(),
            "shapecheck: invalid use at $.a: invalid validator"
        );
    }
}
