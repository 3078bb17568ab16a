//! Validation error types.

use crate::FieldPath;

/// The specific kind of validation error that occurred.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationErrorKind {
    /// The value itself is absent.
    #[error("cannot be empty")]
    EmptyValue,

    /// The dereferenced value is not a structured record.
    #[error("must be a struct but found {found}")]
    NotAStruct {
        /// Description of the value that was found instead.
        found: &'static str,
    },

    /// A required field is missing or holds a zero value.
    #[error("required field `{field}` cannot be empty")]
    RequiredFieldMissing {
        /// External name of the offending field.
        field: String,
    },
}

/// A validation error with path context.
///
/// For [`ValidationErrorKind::RequiredFieldMissing`] the path points at the
/// offending field itself (`input.question`); for the other kinds it points
/// at the value that was rejected (`output.details`).
///
/// # Example
///
/// ```
/// use tysig_error::{FieldPath, ValidationError};
///
/// let error = ValidationError::required_field_missing(&FieldPath::root("output"), "answer");
///
/// assert_eq!(
///     error.to_string(),
///     "required field `output.answer` cannot be empty"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", render(.kind, .path))]
pub struct ValidationError {
    /// The specific error that occurred.
    pub kind: ValidationErrorKind,
    /// Where in the value the error occurred.
    pub path: FieldPath,
}

impl ValidationError {
    /// Create a new validation error at the given path.
    #[must_use]
    pub fn new(kind: ValidationErrorKind, path: FieldPath) -> Self {
        Self { kind, path }
    }

    // =========================================================================
    // Convenience constructors
    // =========================================================================

    /// The value at `path` is absent.
    #[must_use]
    pub fn empty_value(path: &FieldPath) -> Self {
        Self::new(ValidationErrorKind::EmptyValue, path.clone())
    }

    /// The value at `path` is not a record.
    #[must_use]
    pub fn not_a_struct(path: &FieldPath, found: &'static str) -> Self {
        Self::new(ValidationErrorKind::NotAStruct { found }, path.clone())
    }

    /// The required field `field` under `parent` is missing or zero.
    #[must_use]
    pub fn required_field_missing(parent: &FieldPath, field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            ValidationErrorKind::RequiredFieldMissing {
                field: field.clone(),
            },
            parent.child(field),
        )
    }

    /// Dotted path to the failure, e.g. `output.details.city`.
    #[must_use]
    pub fn field_path(&self) -> String {
        self.path.to_string()
    }

    #[must_use]
    pub fn is_required_field_missing(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::RequiredFieldMissing { .. })
    }
}

fn render(kind: &ValidationErrorKind, path: &FieldPath) -> String {
    match kind {
        ValidationErrorKind::RequiredFieldMissing { field } if path.is_empty() => {
            format!("required field `{field}` cannot be empty")
        }
        ValidationErrorKind::RequiredFieldMissing { .. } => {
            format!("required field `{path}` cannot be empty")
        }
        _ if path.is_empty() => format!("value {kind}"),
        _ => format!("`{path}` {kind}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value() {
        let err = ValidationError::empty_value(&FieldPath::root("input"));
        assert_eq!(err.to_string(), "`input` cannot be empty");
    }

    #[test]
    fn test_not_a_struct() {
        let err = ValidationError::not_a_struct(&FieldPath::root("output").child("meta"), "list");
        assert_eq!(err.to_string(), "`output.meta` must be a struct but found list");

        let err = ValidationError::not_a_struct(&FieldPath::default(), "string");
        assert_eq!(err.to_string(), "value must be a struct but found string");
    }

    #[test]
    fn test_required_field_missing_names_full_path() {
        let parent = FieldPath::root("output").child("details");
        let err = ValidationError::required_field_missing(&parent, "city");
        assert!(err.is_required_field_missing());
        assert_eq!(err.field_path(), "output.details.city");
        assert_eq!(
            err.to_string(),
            "required field `output.details.city` cannot be empty"
        );
        assert_eq!(
            err.kind,
            ValidationErrorKind::RequiredFieldMissing {
                field: "city".into()
            }
        );
    }
}
