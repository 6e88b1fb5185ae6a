//! The validator grammar.
//!
//! A [`Validator`] is plain data: a primitive marker, a typed reference, an
//! object shape, an array shape, or a combinator [`Wrapper`]. Shapes nest
//! arbitrarily; matching lives in [`crate::check`].
use std::fmt;
use std::sync::Arc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::data_type::DataType;
use crate::failure::{Failure, FailureKind};
use crate::wrapper::Wrapper;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub enum Validator {
    /// primitive marker
    Kind(Kind),
    /// value must deserialize into a Rust type
    Type(TypeRef),
    Object(ObjectShape),
    /// every element must satisfy the item validator
    Array(Box<Validator>),
    Wrapper(Wrapper),
}

/// Primitive-type markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Boolean,
    Number,
    /// a number without a fractional part
    Integer,
    Object,
    Array,
    Null,
}

/// Mapping from property name to nested validator.
///
/// Fields are checked in declaration order, so the first failing field in that
/// order is the one reported. Strict shapes (the default) also reject any own
/// key of the value that is not declared here.
#[derive(Debug, Clone)]
pub struct ObjectShape {
    fields: IndexMap<String, Validator>,
    strict: bool,
}

/// "Instance of" a Rust type: passes iff the value deserializes into `T`.
#[derive(Clone)]
pub struct TypeRef {
    name: String,
    probe: Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Validator {
    pub fn object<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Validator>,
    {
        Validator::Object(ObjectShape::from_fields(fields))
    }

    pub fn array(item: impl Into<Validator>) -> Self {
        Validator::Array(Box::new(item.into()))
    }

    pub fn of<T: DeserializeOwned + 'static>() -> Self {
        Validator::Type(TypeRef::of::<T>())
    }

    /// Rewrite every object shape in the tree as a loose one.
    pub fn into_loose(self) -> Self {
        match self {
            Validator::Object(shape) => {
                let fields = shape.fields.into_iter()
                    .map(|(k, v)| (k, v.into_loose()))
                    .collect();
                Validator::Object(ObjectShape { fields, strict: false })
            }
            Validator::Array(item) => Validator::Array(Box::new(item.into_loose())),
            Validator::Wrapper(wrapper) => Validator::Wrapper(wrapper.into_loose()),
            other => other,
        }
    }
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::String,
        Kind::Boolean,
        Kind::Number,
        Kind::Integer,
        Kind::Object,
        Kind::Array,
        Kind::Null,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::Integer => "integer",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::Null => "null",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Kind::ALL.into_iter().find(|k| k.as_str() == name)
    }

    pub fn accepts(self, value: Option<&Value>) -> bool {
        match (self, value) {
            (Kind::Integer, Some(Value::Number(n))) => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
            }
            (Kind::Integer, _) => false,
            (kind, value) => kind.data_type() == DataType::of(value),
        }
    }

    /// The data type a non-integer marker compares against.
    fn data_type(self) -> DataType {
        match self {
            Kind::String => DataType::String,
            Kind::Boolean => DataType::Boolean,
            Kind::Number | Kind::Integer => DataType::Number,
            Kind::Object => DataType::Object,
            Kind::Array => DataType::Array,
            Kind::Null => DataType::Null,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ObjectShape {
    pub fn new() -> Self {
        Self { fields: IndexMap::new(), strict: true }
    }

    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Validator>,
    {
        let fields = fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { fields, strict: true }
    }

    pub fn field(mut self, key: impl Into<String>, validator: impl Into<Validator>) -> Self {
        self.fields.insert(key.into(), validator.into());
        self
    }

    /// Allow keys on the value that the shape does not declare.
    pub fn loose(mut self) -> Self {
        self.strict = false;
        self
    }

    pub fn is_strict(&self) -> bool { self.strict }
    pub fn fields(&self) -> &IndexMap<String, Validator> { &self.fields }
    pub fn contains_key(&self, key: &str) -> bool { self.fields.contains_key(key) }
}

impl Default for ObjectShape {
    fn default() -> Self { Self::new() }
}

impl TypeRef {
    pub fn of<T: DeserializeOwned + 'static>() -> Self {
        Self::named::<T>(short_type_name(std::any::type_name::<T>()))
    }

    pub fn named<T: DeserializeOwned + 'static>(name: impl Into<String>) -> Self {
        let probe = |value: &Value| {
            crate::path_de::from_value_with_path::<T>(value).map(|_| ())
        };
        Self { name: name.into(), probe: Arc::new(probe) }
    }

    pub fn name(&self) -> &str {
        if self.name.is_empty() { "anonymous type" } else { &self.name }
    }

    pub(crate) fn check(&self, value: Option<&Value>) -> Result<(), Failure> {
        let failure = |detail| Failure::new(FailureKind::InstanceOf {
            expected: self.name().to_string(),
            got: DataType::of(value),
            detail,
        });
        match value {
            None => Err(failure(None)),
            Some(v) => (self.probe)(v).map_err(|detail| failure(Some(detail))),
        }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name).finish()
    }
}

// ------------------------------ Conversions ------------------------------- //

impl From<Kind> for Validator {
    fn from(kind: Kind) -> Self { Validator::Kind(kind) }
}

impl From<ObjectShape> for Validator {
    fn from(shape: ObjectShape) -> Self { Validator::Object(shape) }
}

impl From<TypeRef> for Validator {
    fn from(ty: TypeRef) -> Self { Validator::Type(ty) }
}

impl From<Wrapper> for Validator {
    fn from(wrapper: Wrapper) -> Self { Validator::Wrapper(wrapper) }
}

/// `[item]` is the array shape.
impl<V: Into<Validator>> From<[V; 1]> for Validator {
    fn from([item]: [V; 1]) -> Self { Validator::array(item) }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// `alloc::vec::Vec<my_crate::Point>` → `Vec<Point>`
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut ident = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            ident.push(c);
            continue;
        }
        out.push_str(ident.rsplit("::").next().unwrap_or_default());
        ident.clear();
        out.push(c);
    }
    out.push_str(ident.rsplit("::").next().unwrap_or_default());
    out
}

// -------------------------------- Tests ----------------------------------- //
