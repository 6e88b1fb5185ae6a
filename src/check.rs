//! The recursive matching engine.
use serde_json::{Map, Value};

use crate::data_type::DataType;
use crate::failure::{Failure, FailureKind};
use crate::validator::{ObjectShape, Validator};

/// Check a value against a validator.
///
/// Returns the first failure found, in array order for array shapes and in
/// declaration order for object shapes. Sibling failures are not collected.
pub fn check(value: &Value, validator: &Validator) -> Result<(), Failure> {
    check_option(Some(value), validator)
}

/// Like [`check`], where `None` stands for an absent property.
pub fn check_option(value: Option<&Value>, validator: &Validator) -> Result<(), Failure> {
    match validator {
        Validator::Wrapper(wrapper) => wrapper.run(value),
        Validator::Array(item) => check_array(value, item),
        Validator::Object(shape) => check_object(value, shape),
        Validator::Kind(kind) => {
            if kind.accepts(value) {
                Ok(())
            } else {
                Err(Failure::new(FailureKind::NativeType {
                    expected: *kind,
                    got: DataType::of(value),
                }))
            }
        }
        Validator::Type(ty) => ty.check(value),
    }
}

fn check_array(value: Option<&Value>, item: &Validator) -> Result<(), Failure> {
    let Some(Value::Array(elements)) = value else {
        return Err(Failure::new(FailureKind::ArrayLiteral { got: DataType::of(value) }));
    };
    for (index, element) in elements.iter().enumerate() {
        if let Err(failure) = check_option(Some(element), item) {
            tracing::trace!(index, len = elements.len(), "array shape short-circuited");
            return Err(failure.within_index(index));
        }
    }
    Ok(())
}

fn check_object(value: Option<&Value>, shape: &ObjectShape) -> Result<(), Failure> {
    let Some(Value::Object(map)) = value else {
        return Err(Failure::new(FailureKind::ObjectLiteral { got: DataType::of(value) }));
    };
    if shape.is_strict() {
        if let Some(key) = unknown_key(map, shape) {
            let mut failure = Failure::new(FailureKind::UnknownKey { key: key.clone() });
            failure.path.push(crate::failure::PathSegment::Key(key.clone()));
            return Err(failure);
        }
    }
    for (key, nested) in shape.fields() {
        if let Err(failure) = check_option(map.get(key), nested) {
            tracing::trace!(key = key.as_str(), "object shape short-circuited");
            return Err(failure.within_key(key));
        }
    }
    Ok(())
}

fn unknown_key<'a>(map: &'a Map<String, Value>, shape: &ObjectShape) -> Option<&'a String> {
    map.keys().find(|key| !shape.contains_key(key))
}

// -------------------------------- Tests ----------------------------------- //
