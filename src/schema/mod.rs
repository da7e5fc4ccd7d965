//! Declarative object validation and filtering
//!
//! Given a nested schema description and an input object, recursively
//! validates presence, type, and shape, then produces a new output object
//! whose keys and values have been renamed, filtered, coerced, flattened,
//! or defaulted according to the schema.
//!
//! # Design Principles
//!
//! - The input and schema are never mutated; validation builds a fresh output
//! - All failures are fatal to the call, no partial results
//! - Filters are a closed sum type (no "unknown filter name" at runtime)
//! - Deterministic: same input and schema, same output

mod errors;
mod types;
mod validator;
mod value;

pub use errors::{SchemaError, SchemaResult};
pub use types::{Coercion, Filter, Primitive, Property, Schema, TypeSpec};
pub use validator::validate;
pub use value::{Document, FieldValue, ObjectId, ParseObjectIdError};
