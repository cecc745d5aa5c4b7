//! Error types for field-value validation.
//!
//! Every failure surfaces as a single [`ValidationError`] carrying a typed
//! [`ErrorCode`], a human-readable message, and the [`FieldPath`] of the
//! failing value. Errors arising inside nested table cells are wrapped with
//! their row/column path on the way up, so the top-level caller gets one
//! fully-qualified failure. There is no recovery and no partial success at
//! this layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::kind::FieldKind;

/// Result type alias for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Type-safe error codes for field validation.
///
/// When serialized to JSON, codes are converted to SCREAMING_SNAKE_CASE
/// (e.g. `ShapeMismatch` becomes `"SHAPE_MISMATCH"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    /// The field-kind tag is not in the closed registry.
    UnknownFieldKind,
    /// A content-bearing field's wire string is not valid JSON.
    MalformedContentEncoding,
    /// The decoded value's structure does not match the kind's shape.
    ShapeMismatch,
    /// The value is structurally correct but out of bounds.
    ConstraintViolation,
    /// Table nesting exceeds the configured depth cap.
    DepthExceeded,
    /// A content-bearing field's wire string exceeds the configured size cap.
    ContentTooLarge,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownFieldKind => "UNKNOWN_FIELD_KIND",
            Self::MalformedContentEncoding => "MALFORMED_CONTENT_ENCODING",
            Self::ShapeMismatch => "SHAPE_MISMATCH",
            Self::ConstraintViolation => "CONSTRAINT_VIOLATION",
            Self::DepthExceeded => "DEPTH_EXCEEDED",
            Self::ContentTooLarge => "CONTENT_TOO_LARGE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One step in the path from a top-level field down to a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathSegment {
    /// A row index within a table field.
    Row(usize),
    /// A column (field) name within a table row.
    Column(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(index) => write!(f, "row {}", index),
            Self::Column(name) => write!(f, "column '{}'", name),
        }
    }
}

/// Location of a failing value, outermost segment first.
///
/// An empty path means the error occurred at the field itself rather than
/// inside a nested table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The empty path: the error is at the top-level field.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns true if the path is empty.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    fn push_front(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }

    /// Renders `"row 0, column 'col1': "` for display, or `""` at the root.
    pub(crate) fn prefix(&self) -> String {
        if self.is_root() {
            String::new()
        } else {
            format!("{}: ", self)
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Validation error with typed code, message, and failing-value path.
///
/// # Example
/// ```rust,ignore
/// use formvalue::{ErrorCode, ValidationError};
///
/// let err = ValidationError::shape_mismatch("rate expects an integer")
///     .at_column("score")
///     .at_row(0);
/// assert_eq!(err.code, ErrorCode::ShapeMismatch);
/// assert_eq!(err.to_string(), "[SHAPE_MISMATCH] row 0, column 'score': rate expects an integer");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("[{code}] {}{message}", .path.prefix())]
pub struct ValidationError {
    /// Type-safe error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the failing value; empty for top-level failures.
    #[serde(default, skip_serializing_if = "FieldPath::is_root")]
    pub path: FieldPath,
}

impl ValidationError {
    /// Create a new error with code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: FieldPath::root(),
        }
    }

    /// Create an UNKNOWN_FIELD_KIND error for an unrecognized tag.
    pub fn unknown_kind(tag: &str) -> Self {
        Self::new(
            ErrorCode::UnknownFieldKind,
            format!("unknown field kind '{}'", tag),
        )
    }

    /// Create an UNKNOWN_FIELD_KIND error for a table column with no
    /// schema entry in the resolver.
    pub fn unresolved_column(name: &str) -> Self {
        Self::new(
            ErrorCode::UnknownFieldKind,
            format!("no field kind registered for column '{}'", name),
        )
    }

    /// Create a MALFORMED_CONTENT_ENCODING error from a JSON parse failure.
    pub fn malformed_encoding(kind: FieldKind, source: &serde_json::Error) -> Self {
        Self::new(
            ErrorCode::MalformedContentEncoding,
            format!("{} content is not valid JSON: {}", kind, source),
        )
    }

    /// Create a SHAPE_MISMATCH error.
    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ShapeMismatch, message)
    }

    /// Create a CONSTRAINT_VIOLATION error.
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConstraintViolation, message)
    }

    /// Create a DEPTH_EXCEEDED error.
    pub fn depth_exceeded(max_depth: usize) -> Self {
        Self::new(
            ErrorCode::DepthExceeded,
            format!("table nesting exceeds the maximum depth of {}", max_depth),
        )
    }

    /// Create a CONTENT_TOO_LARGE error.
    pub fn content_too_large(kind: FieldKind, size: usize, max: usize) -> Self {
        Self::new(
            ErrorCode::ContentTooLarge,
            format!(
                "{} content is {} bytes, exceeding the maximum of {} bytes",
                kind, size, max
            ),
        )
    }

    /// Qualify this error with the table row it occurred in.
    pub fn at_row(mut self, index: usize) -> Self {
        self.path.push_front(PathSegment::Row(index));
        self
    }

    /// Qualify this error with the table column it occurred in.
    pub fn at_column(mut self, name: impl Into<String>) -> Self {
        self.path.push_front(PathSegment::Column(name.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_path() {
        let err = ValidationError::constraint("rate must be between 1 and 100");
        assert_eq!(
            err.to_string(),
            "[CONSTRAINT_VIOLATION] rate must be between 1 and 100"
        );
    }

    #[test]
    fn test_display_with_nested_path() {
        let err = ValidationError::shape_mismatch("text expects a string")
            .at_column("col1")
            .at_row(0)
            .at_column("items")
            .at_row(2);
        assert_eq!(
            err.to_string(),
            "[SHAPE_MISMATCH] row 2, column 'items', row 0, column 'col1': text expects a string"
        );
    }

    #[test]
    fn test_path_segments_outermost_first() {
        let err = ValidationError::shape_mismatch("boom")
            .at_column("col1")
            .at_row(3);
        assert_eq!(
            err.path.segments(),
            &[
                PathSegment::Row(3),
                PathSegment::Column("col1".to_string())
            ]
        );
    }

    #[test]
    fn test_code_serialization() {
        let err = ValidationError::depth_exceeded(32);
        let json: serde_json::Value = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "DEPTH_EXCEEDED");
        assert!(json.get("path").is_none());
    }

    #[test]
    fn test_path_serialization() {
        let err = ValidationError::shape_mismatch("boom").at_column("c").at_row(1);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["path"][0]["row"], 1);
        assert_eq!(json["path"][1]["column"], "c");
    }
}
