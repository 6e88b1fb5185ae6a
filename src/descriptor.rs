//! Validator descriptors: the validator grammar spelled as JSON/YAML data.
//!
//! ```text
//! "string" | "boolean" | "number" | "integer" | "object" | "array" | "null"
//! [d]                         array of d
//! {"k": d, ...}               strict object shape ("$$k" for a literal "$k" key)
//! {"$loose": {"k": d, ...}}   loose object shape
//! {"$optional": d}
//! {"$equals": <any json>}
//! {"$oneOf": [d, ...]}
//! {"$every": [d, ...]}
//! ```
//!
//! Malformed descriptors are invalid use, reported with the JSON path of the
//! offending node.
use serde_json::{Map, Value};

use crate::error::Error;
use crate::validator::{Kind, ObjectShape, Validator};
use crate::wrapper::{Wrapper, equals, optional};

impl Validator {
    pub fn from_descriptor(descriptor: &Value) -> Result<Self, Error> {
        let validator = parse(descriptor, "$")?;
        tracing::debug!(root = root_label(&validator), "parsed validator descriptor");
        Ok(validator)
    }

    pub fn from_json_str(src: &str) -> Result<Self, Error> {
        let descriptor = serde_json::from_str::<Value>(src)?;
        Self::from_descriptor(&descriptor)
    }

    pub fn from_yaml_str(src: &str) -> Result<Self, Error> {
        let descriptor = serde_yaml::from_str::<Value>(src)?;
        Self::from_descriptor(&descriptor)
    }

    /// Descriptor for this validator, or `None` if the tree holds a typed
    /// reference or a custom predicate.
    pub fn to_descriptor(&self) -> Option<Value> {
        match self {
            Validator::Kind(kind) => Some(Value::String(kind.as_str().to_string())),
            Validator::Type(_) => None,
            Validator::Array(item) => Some(Value::Array(vec![item.to_descriptor()?])),
            Validator::Object(shape) => {
                let mut fields = Map::new();
                for (key, nested) in shape.fields() {
                    let key = if key.starts_with('$') { format!("${key}") } else { key.clone() };
                    fields.insert(key, nested.to_descriptor()?);
                }
                if shape.is_strict() {
                    Some(Value::Object(fields))
                } else {
                    Some(single("$loose", Value::Object(fields)))
                }
            }
            Validator::Wrapper(wrapper) => match wrapper {
                Wrapper::Optional(inner) => Some(single("$optional", inner.to_descriptor()?)),
                Wrapper::Equals(expected) => Some(single("$equals", expected.clone())),
                Wrapper::OneOf(vs) => Some(single("$oneOf", list_descriptor(vs)?)),
                Wrapper::Every(vs) => Some(single("$every", list_descriptor(vs)?)),
                Wrapper::Custom(_) => None,
            },
        }
    }
}

// ------------------------------- Parsing ---------------------------------- //

fn parse(node: &Value, path: &str) -> Result<Validator, Error> {
    match node {
        Value::String(name) => Kind::from_name(name)
            .map(Validator::Kind)
            .ok_or_else(|| Error::invalid_use_at(path, format!("unknown type marker \"{name}\""))),
        Value::Array(items) => match items.as_slice() {
            [item] => Ok(Validator::array(parse(item, &format!("{path}[0]"))?)),
            [] => Err(Error::invalid_use_at(path, "invalid validator: empty array literal")),
            more => Err(Error::invalid_use_at(
                path,
                format!("array literal takes exactly one item validator, got {}", more.len()),
            )),
        },
        Value::Object(map) => match combinator_key(map, path)? {
            Some(name) => parse_combinator(name, &map[name], path),
            None => Ok(parse_shape(map, path)?.into()),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) => {
            Err(Error::invalid_use_at(path, "invalid validator"))
        }
    }
}

/// The single `$name` key of a combinator node, if this node is one.
fn combinator_key<'a>(map: &'a Map<String, Value>, path: &str) -> Result<Option<&'a str>, Error> {
    let Some(name) = map.keys().find(|k| is_combinator(k)) else {
        return Ok(None);
    };
    if map.len() > 1 {
        return Err(Error::invalid_use_at(
            path,
            format!("combinator \"{name}\" cannot be mixed with other keys"),
        ));
    }
    Ok(Some(name.as_str()))
}

fn parse_combinator(name: &str, arg: &Value, path: &str) -> Result<Validator, Error> {
    let arg_path = format!("{path}.{name}");
    match name {
        "$optional" => Ok(optional(parse(arg, &arg_path)?)),
        "$equals" => Ok(equals(arg.clone())),
        "$loose" => match arg {
            Value::Object(map) => Ok(parse_shape(map, &arg_path)?.loose().into()),
            _ => Err(Error::invalid_use_at(&arg_path, "$loose expects an object literal")),
        },
        "$oneOf" => Ok(Wrapper::OneOf(parse_list(name, arg, &arg_path)?).into()),
        "$every" => Ok(Wrapper::Every(parse_list(name, arg, &arg_path)?).into()),
        _ => Err(Error::invalid_use_at(path, format!("unknown combinator \"{name}\""))),
    }
}

fn parse_list(name: &str, arg: &Value, path: &str) -> Result<Vec<Validator>, Error> {
    let Value::Array(items) = arg else {
        return Err(Error::invalid_use_at(path, format!("{name} expects an array")));
    };
    if items.is_empty() {
        return Err(Error::invalid_use_at(path, format!("{name} expects at least one validator")));
    }
    items.iter()
        .enumerate()
        .map(|(i, item)| parse(item, &format!("{path}[{i}]")))
        .collect()
}

fn parse_shape(map: &Map<String, Value>, path: &str) -> Result<ObjectShape, Error> {
    let mut shape = ObjectShape::new();
    for (key, nested) in map {
        let key = key.strip_prefix('$').filter(|k| k.starts_with('$')).unwrap_or(key.as_str());
        let nested = parse(nested, &format!("{path}.{key}"))?;
        shape = shape.field(key, nested);
    }
    Ok(shape)
}

// ---------------------------- Internal helpers ---------------------------- //

fn is_combinator(key: &str) -> bool {
    key.starts_with('$') && !key.starts_with("$$")
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

fn list_descriptor(validators: &[Validator]) -> Option<Value> {
    validators.iter().map(Validator::to_descriptor).collect::<Option<Vec<_>>>().map(Value::Array)
}

fn root_label(validator: &Validator) -> &'static str {
    match validator {
        Validator::Kind(kind) => kind.as_str(),
        Validator::Type(_) => "type",
        Validator::Object(_) => "object-literal",
        Validator::Array(_) => "array-literal",
        Validator::Wrapper(wrapper) => wrapper.tag(),
    }
}

// -------------------------------- Tests ----------------------------------- //
