//! Error-report normalization
//!
//! Services exchange failures as structured reports rather than raw error
//! types. [`ErrorReport`] carries an optional transport-agnostic code plus
//! classification fields, a human-readable message, and a propagation stack
//! that accumulates frames as the report crosses call and service
//! boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::SchemaError;

/// Normalized error representation shared across services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Numeric failure code, if classified (e.g. 400 for validation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Failure category (e.g. "validation")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Offending field, when the failure concerns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Short reason suitable for returning to a caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Human-readable message
    pub message: String,
    /// Propagation stack, oldest frame first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack: Vec<String>,
}

impl ErrorReport {
    /// Builds a report from a bare message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            stack: vec![message.clone()],
            message,
            ..Self::default()
        }
    }

    /// Builds a report from any error, seeding the stack with the full
    /// source chain.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut stack = vec![err.to_string()];
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push(format!("caused by: {}", cause));
            source = cause.source();
        }

        Self {
            message: err.to_string(),
            stack,
            ..Self::default()
        }
    }

    /// Sets the numeric code.
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }

    /// Sets the failure category.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Names the offending field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the caller-facing reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Appends a propagation frame as the report travels upward.
    pub fn trace(&mut self, frame: impl Into<String>) {
        self.stack.push(format!("at {}", frame.into()));
    }

    /// Repairs a report that crossed a service boundary without its stack.
    ///
    /// A report relayed through another API server keeps its message but
    /// may arrive with an empty stack; re-seed it so tracing can resume.
    pub fn normalize(mut self) -> Self {
        if self.stack.is_empty() && !self.message.is_empty() {
            self.stack.push(self.message.clone());
        }
        self
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for frame in &self.stack {
            write!(f, "\n    {}", frame)?;
        }
        Ok(())
    }
}

impl From<SchemaError> for ErrorReport {
    fn from(err: SchemaError) -> Self {
        ErrorReport::from_error(&err)
            .with_code(400)
            .with_kind("validation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("outer failure")]
    struct Outer {
        #[source]
        inner: Inner,
    }

    #[derive(Debug, Error)]
    #[error("inner failure")]
    struct Inner;

    #[test]
    fn test_from_error_captures_source_chain() {
        let report = ErrorReport::from_error(&Outer { inner: Inner });
        assert_eq!(report.message, "outer failure");
        assert_eq!(
            report.stack,
            vec!["outer failure".to_string(), "caused by: inner failure".to_string()]
        );
    }

    #[test]
    fn test_trace_appends_frames() {
        let mut report = ErrorReport::new("boom");
        report.trace("storage.get");
        report.trace("api.handler");

        assert_eq!(
            report.stack,
            vec![
                "boom".to_string(),
                "at storage.get".to_string(),
                "at api.handler".to_string()
            ]
        );
    }

    #[test]
    fn test_normalize_reseeds_missing_stack() {
        let relayed = ErrorReport {
            message: "remote failure".into(),
            ..Default::default()
        };
        let report = relayed.normalize();
        assert_eq!(report.stack, vec!["remote failure".to_string()]);

        // An intact stack is left alone
        let intact = ErrorReport::new("boom").normalize();
        assert_eq!(intact.stack, vec!["boom".to_string()]);
    }

    #[test]
    fn test_schema_error_becomes_validation_report() {
        let err = SchemaError::MissingRequired("email".into());
        let report = ErrorReport::from(err);

        assert_eq!(report.code, Some(400));
        assert_eq!(report.kind.as_deref(), Some("validation"));
        assert!(report.message.contains("email"));
    }

    #[test]
    fn test_serde_skips_absent_fields() {
        let report = ErrorReport::new("boom");
        let encoded = serde_json::to_value(&report).unwrap();
        let obj = encoded.as_object().unwrap();

        assert!(!obj.contains_key("code"));
        assert!(!obj.contains_key("field"));
        assert_eq!(obj["message"], "boom");

        let decoded: ErrorReport = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, report);
    }
}
