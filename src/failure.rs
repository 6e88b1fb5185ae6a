//! Validation failures.
//!
//! A [`Failure`] is the non-boolean return channel of [`crate::check`]. It is
//! created at the failing leaf and travels up unchanged, except that object
//! and array checks attach the key/index they were looking at on the way out.
use std::fmt;
use serde::Serialize;
use serde_json::Value;

use crate::data_type::DataType;
use crate::validator::Kind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    #[serde(flatten)]
    pub kind: FailureKind,
    /// failed underneath `optional(..)` (only affects the clue wording)
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    /// property the failure is attributed to; innermost object wins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// location of the failing leaf relative to the checked root
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "info")]
pub enum FailureKind {
    #[serde(rename = "nativetype")]
    NativeType {
        #[serde(rename = "expectedType")]
        expected: Kind,
        got: DataType,
    },
    #[serde(rename = "instanceof")]
    InstanceOf {
        #[serde(rename = "expectedInstance")]
        expected: String,
        got: DataType,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    #[serde(rename = "array-literal")]
    ArrayLiteral { got: DataType },
    #[serde(rename = "object-literal")]
    ObjectLiteral { got: DataType },
    #[serde(rename = "object-literal-unknown-key")]
    UnknownKey { key: String },
    #[serde(rename = "wrapper.validator")]
    Custom {
        #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
        error_message: Option<String>,
    },
    #[serde(rename = "wrapper.equals")]
    Equals {
        #[serde(rename = "expectedValue")]
        expected: Value,
    },
    #[serde(rename = "wrapper.oneOf")]
    OneOf {
        #[serde(rename = "amountOfValidators")]
        validators: usize,
    },
    #[serde(rename = "wrapper.every")]
    Every {
        #[serde(rename = "amountOfValidators")]
        validators: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl Failure {
    pub fn new(kind: FailureKind) -> Self {
        Self { kind, optional: false, key: None, path: Vec::new() }
    }

    pub fn tag(&self) -> &'static str { self.kind.tag() }

    /// Classified type of the offending value, for kinds that record it.
    pub fn got(&self) -> Option<DataType> {
        match &self.kind {
            FailureKind::NativeType { got, .. }
            | FailureKind::InstanceOf { got, .. }
            | FailureKind::ArrayLiteral { got }
            | FailureKind::ObjectLiteral { got } => Some(*got),
            _ => None,
        }
    }

    /// Merge a key into the info without replacing one set further down.
    pub fn add_key(&mut self, key: &str) {
        if self.key.is_none() {
            self.key = Some(key.to_string());
        }
    }

    pub(crate) fn within_key(mut self, key: &str) -> Self {
        self.add_key(key);
        self.path.insert(0, PathSegment::Key(key.to_string()));
        self
    }

    pub(crate) fn within_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathSegment::Index(index));
        self
    }

    pub(crate) fn into_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// The offending value inside `root`; `None` when it is an absent property.
    pub fn locate<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.path.iter().try_fold(root, |node, segment| match segment {
            PathSegment::Key(k) => node.get(k.as_str()),
            PathSegment::Index(i) => node.get(*i),
        })
    }

    /// `$.items[2].name`
    pub fn path_string(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.path {
            match segment {
                PathSegment::Key(k) => { out.push('.'); out.push_str(k); }
                PathSegment::Index(i) => out.push_str(&format!("[{i}]")),
            }
        }
        out
    }
}

impl FailureKind {
    pub fn tag(&self) -> &'static str {
        match self {
            FailureKind::NativeType { .. } => "nativetype",
            FailureKind::InstanceOf { .. } => "instanceof",
            FailureKind::ArrayLiteral { .. } => "array-literal",
            FailureKind::ObjectLiteral { .. } => "object-literal",
            FailureKind::UnknownKey { .. } => "object-literal-unknown-key",
            FailureKind::Custom { .. } => "wrapper.validator",
            FailureKind::Equals { .. } => "wrapper.equals",
            FailureKind::OneOf { .. } => "wrapper.oneOf",
            FailureKind::Every { .. } => "wrapper.every",
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.tag(), self.path_string())
    }
}

// -------------------------------- Tests ----------------------------------- //
