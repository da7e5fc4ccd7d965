//! # Schema Errors
//!
//! Error types for declarative object validation.
//!
//! Every failure is fatal to the call: validation never returns a partial
//! result. Callers are expected to catch these and translate them into
//! their own error representation (e.g. a request-validation failure).

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Validation and filtering errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The validator was handed something other than a JSON object
    #[error("Invalid usage: expected a JSON object as input, found {found}")]
    InputNotObject {
        /// Runtime type of the offending input
        found: &'static str,
    },

    /// A required property has no matching key in the input
    #[error("Missing required property: {0}")]
    MissingRequired(String),

    /// A required property's output key is absent after filtering
    #[error("Missing required property after filtering: {0}")]
    MissingAfterFilter(String),

    /// The input value matched none of the declared type alternatives
    #[error("Invalid type for property '{property}': expected {expected}, found {found}")]
    TypeMismatch {
        property: String,
        expected: String,
        found: &'static str,
    },

    /// A rename target is already populated in the output
    #[error("Cannot rename property '{from}' to '{to}': output key already exists")]
    RenameCollision { from: String, to: String },

    /// A flattened dotted key is already populated in the output
    #[error("Cannot flatten property '{child}' under '{parent}': output key '{key}' already exists")]
    FlattenCollision {
        parent: String,
        child: String,
        key: String,
    },

    /// Two properties produced the same output key
    #[error("Duplicate output key: {0}")]
    DuplicateKey(String),

    /// A projection sub-object contained a value other than literal false
    #[error("Invalid projection value for property '{property}': '{key}' must be false")]
    InvalidProjection { property: String, key: String },

    /// Input could not be coerced into a canonical identifier reference
    #[error("Invalid identifier reference for property '{property}': {input:?}")]
    InvalidIdReference { property: String, input: String },

    /// Input could not be coerced into a timestamp
    #[error("Invalid timestamp for property '{property}': {input:?}")]
    InvalidTimestamp { property: String, input: String },

    /// The property descriptor itself is unusable as declared
    #[error("Malformed descriptor for property '{property}': {reason}")]
    MalformedDescriptor { property: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_identify_the_property() {
        let err = SchemaError::MissingRequired("email".into());
        assert!(err.to_string().contains("email"));

        let err = SchemaError::TypeMismatch {
            property: "age".into(),
            expected: "number".into(),
            found: "string",
        };
        let display = err.to_string();
        assert!(display.contains("age"));
        assert!(display.contains("number"));
        assert!(display.contains("string"));
    }

    #[test]
    fn test_collision_messages_name_both_keys() {
        let err = SchemaError::RenameCollision {
            from: "uid".into(),
            to: "_id".into(),
        };
        let display = err.to_string();
        assert!(display.contains("uid"));
        assert!(display.contains("_id"));
    }
}
