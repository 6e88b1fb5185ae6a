//! shapecheck: structural runtime validation of JSON values.
//!
//! A [`Validator`] is plain data describing a shape. [`check`] walks a value
//! against it and returns the first [`Failure`]; [`passes`] and [`ensure`]
//! turn that into a boolean or an error.
//!
//! ```
//! use serde_json::{json, Value};
//! use shapecheck::{Kind, Validator, ensure, optional, passes, validate};
//!
//! let user = Validator::object([
//!     ("name", Validator::from(Kind::String)),
//!     ("age", optional(Kind::Integer)),
//!     ("roles", Validator::array(Kind::String)),
//!     ("karma", validate(|v: &Value| v.as_i64().is_some_and(|n| n >= 0))),
//! ]);
//!
//! assert!(passes(&json!({"name": "Ada", "roles": [], "karma": 3}), &user));
//!
//! let err = ensure(&json!({"name": 1, "roles": [], "karma": 3}), &user).unwrap_err();
//! assert_eq!(err.clue, "Expected string for key \"name\", got number.");
//! ```
//!
//! Validators can also be loaded from data, see [`Validator::from_descriptor`].
//! Validators are owned trees and cannot be cyclic; checking recurses as deep
//! as the validator nests.
pub mod path_de;

mod check;
mod clue;
mod data_type;
mod descriptor;
mod ensure;
mod error;
mod failure;
mod validator;
mod wrapper;

pub use check::{check, check_option};
pub use clue::render_clue;
pub use data_type::DataType;
pub use ensure::{ensure, ensure_with, passes};
pub use error::{Error, ValidationError};
pub use failure::{Failure, FailureKind, PathSegment};
pub use validator::{Kind, ObjectShape, TypeRef, Validator};
pub use wrapper::{Custom, Verdict, Wrapper, equals, every, one_of, optional, validate, validate_named};
