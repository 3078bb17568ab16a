//! Error types for tysig.
//!
//! This module provides the umbrella error for fallible operations:
//! - [`Error`] - all tysig errors (shorthand parsing, validation, schema decoding)
//! - [`MalformedReason`] - why a shorthand signature was rejected
//! - [`SchemaDecodeError`] - why a schema document could not be decoded
//! - [`ValidationError`], [`ValidationErrorKind`], [`FieldPath`] - re-exported
//!   from `tysig-error`

use core::fmt;

pub use tysig_error::{FieldPath, ValidationError, ValidationErrorKind};

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Result of a validation.
pub type ValidationResult<T> = core::result::Result<T, ValidationError>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A shorthand signature could not be parsed.
    #[error("malformed signature `{text}`: {reason}")]
    MalformedSignature {
        /// The rejected input, verbatim.
        text: String,
        reason: MalformedReason,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to decode schema document: {0}")]
    SchemaDecodeFailed(#[from] SchemaDecodeError),
}

impl Error {
    #[must_use]
    pub fn malformed(text: impl Into<String>, reason: MalformedReason) -> Self {
        Self::MalformedSignature {
            text: text.into(),
            reason,
        }
    }

    /// The validation error, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Which side of a shorthand signature a field sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Inputs,
    Outputs,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Inputs => f.write_str("inputs"),
            Side::Outputs => f.write_str("outputs"),
        }
    }
}

/// Reason a shorthand signature was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    /// The text does not contain exactly one `->`.
    #[error("expected exactly one `->`, found {0}")]
    ArrowCount(usize),

    /// A comma-separated entry is empty after trimming.
    #[error("empty field name at position {index} of the {side}")]
    EmptyField { side: Side, index: usize },
}

/// Reason a schema document could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum SchemaDecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The JSON is well-formed but violates a structural rule.
    #[error("at `{path}`: {message}")]
    Structure { path: String, message: String },
}
