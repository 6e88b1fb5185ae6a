//! Combinators.
//!
//! Each combinator is a named [`Wrapper`] variant carrying its own payload.
//! Matching always re-enters [`crate::check`] rather than reimplementing it.
use std::fmt;
use std::sync::Arc;
use serde_json::Value;

use crate::check::check_option;
use crate::error::{Error, ValidationError};
use crate::failure::{Failure, FailureKind};
use crate::validator::Validator;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub enum Wrapper {
    /// absent or `null` passes; anything else must satisfy the inner validator
    Optional(Box<Validator>),
    Equals(Value),
    /// first match wins
    OneOf(Vec<Validator>),
    Every(Vec<Validator>),
    Custom(Custom),
}

/// A user predicate, see [`validate`].
#[derive(Clone)]
pub struct Custom {
    name: Option<String>,
    run: Arc<dyn Fn(&Value) -> Result<bool, ValidationError> + Send + Sync>,
}

/// What a [`validate`] predicate may return.
///
/// `Err(ValidationError)` is how a predicate aborts with a message, usually by
/// forwarding the result of [`crate::ensure`] on some inner value.
pub trait Verdict {
    fn into_verdict(self) -> Result<bool, ValidationError>;
}

// ————————————————————————————————————————————————————————————————————————————
// CONSTRUCTORS
// ————————————————————————————————————————————————————————————————————————————

pub fn optional(validator: impl Into<Validator>) -> Validator {
    Wrapper::Optional(Box::new(validator.into())).into()
}

/// Strict equality. Numbers compare by value (`5 == 5.0`), arrays and objects
/// structurally.
pub fn equals(expected: impl Into<Value>) -> Validator {
    Wrapper::Equals(expected.into()).into()
}

pub fn one_of<I>(validators: I) -> Result<Validator, Error>
where
    I: IntoIterator,
    I::Item: Into<Validator>,
{
    let validators = collect_non_empty(validators, "one_of")?;
    Ok(Wrapper::OneOf(validators).into())
}

pub fn every<I>(validators: I) -> Result<Validator, Error>
where
    I: IntoIterator,
    I::Item: Into<Validator>,
{
    let validators = collect_non_empty(validators, "every")?;
    Ok(Wrapper::Every(validators).into())
}

/// Custom predicate.
///
/// The predicate sees `null` for an absent property. A panic inside it is not
/// caught.
pub fn validate<F, R>(predicate: F) -> Validator
where
    F: Fn(&Value) -> R + Send + Sync + 'static,
    R: Verdict,
{
    Wrapper::Custom(Custom::new(None, predicate)).into()
}

/// [`validate`] with a name that shows up in `Debug` output.
pub fn validate_named<F, R>(name: impl Into<String>, predicate: F) -> Validator
where
    F: Fn(&Value) -> R + Send + Sync + 'static,
    R: Verdict,
{
    Wrapper::Custom(Custom::new(Some(name.into()), predicate)).into()
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Wrapper {
    pub fn tag(&self) -> &'static str {
        match self {
            Wrapper::Optional(_) => "optional",
            Wrapper::Equals(_) => "equals",
            Wrapper::OneOf(_) => "oneOf",
            Wrapper::Every(_) => "every",
            Wrapper::Custom(_) => "validator",
        }
    }

    pub(crate) fn run(&self, value: Option<&Value>) -> Result<(), Failure> {
        tracing::trace!(wrapper = self.tag(), "running wrapper");
        match self {
            Wrapper::Optional(inner) => {
                if matches!(value, None | Some(Value::Null)) {
                    return Ok(());
                }
                check_option(value, inner).map_err(Failure::into_optional)
            }
            Wrapper::Equals(expected) => {
                if value.is_some_and(|v| strictly_equal(v, expected)) {
                    Ok(())
                } else {
                    Err(Failure::new(FailureKind::Equals { expected: expected.clone() }))
                }
            }
            Wrapper::OneOf(validators) => {
                if validators.iter().any(|v| check_option(value, v).is_ok()) {
                    Ok(())
                } else {
                    Err(Failure::new(FailureKind::OneOf { validators: validators.len() }))
                }
            }
            Wrapper::Every(validators) => {
                if validators.iter().all(|v| check_option(value, v).is_ok()) {
                    Ok(())
                } else {
                    Err(Failure::new(FailureKind::Every { validators: validators.len() }))
                }
            }
            Wrapper::Custom(custom) => custom.call(value.unwrap_or(&Value::Null)),
        }
    }

    pub(crate) fn into_loose(self) -> Self {
        match self {
            Wrapper::Optional(inner) => Wrapper::Optional(Box::new(inner.into_loose())),
            Wrapper::OneOf(vs) => Wrapper::OneOf(vs.into_iter().map(Validator::into_loose).collect()),
            Wrapper::Every(vs) => Wrapper::Every(vs.into_iter().map(Validator::into_loose).collect()),
            other => other,
        }
    }
}

impl Custom {
    fn new<F, R>(name: Option<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Verdict,
    {
        let run = move |value: &Value| predicate(value).into_verdict();
        Self { name, run: Arc::new(run) }
    }

    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    fn call(&self, value: &Value) -> Result<(), Failure> {
        match (self.run)(value) {
            Ok(true) => Ok(()),
            Ok(false) => Err(Failure::new(FailureKind::Custom { error_message: None })),
            Err(aborted) => Err(Failure::new(FailureKind::Custom {
                error_message: Some(aborted.message),
            })),
        }
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Custom")
            .field(&self.name.as_deref().unwrap_or("<fn>"))
            .finish()
    }
}

impl Verdict for bool {
    fn into_verdict(self) -> Result<bool, ValidationError> { Ok(self) }
}

impl Verdict for Result<bool, ValidationError> {
    fn into_verdict(self) -> Result<bool, ValidationError> { self }
}

impl Verdict for Result<(), ValidationError> {
    fn into_verdict(self) -> Result<bool, ValidationError> { self.map(|()| true) }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn collect_non_empty<I>(validators: I, combinator: &str) -> Result<Vec<Validator>, Error>
where
    I: IntoIterator,
    I::Item: Into<Validator>,
{
    let validators: Vec<Validator> = validators.into_iter().map(Into::into).collect();
    if validators.is_empty() {
        return Err(Error::invalid_use(format!("{combinator}() expects at least one validator")));
    }
    Ok(validators)
}

pub(crate) fn strictly_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                return x == y;
            }
            if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                return x == y;
            }
            x.as_f64() == y.as_f64()
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| strictly_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs.iter().all(|(k, x)| ys.get(k).is_some_and(|y| strictly_equal(x, y)))
        }
        _ => a == b,
    }
}

// -------------------------------- Tests ----------------------------------- //
