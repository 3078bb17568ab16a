//! Required-field validation of runtime values.
//!
//! Only required fields are checked. A required field passes when it can be
//! located by its binding name and does not hold a zero value (see
//! [`Value::is_zero`]); a present optional is never zero. Required object
//! fields are checked recursively against their nested properties, so their
//! value must be a record; array items are not checked. Validation stops at
//! the first failure.

use tysig_error::{FieldPath, ValidationError};

use crate::{
    error::ValidationResult,
    field::{FieldDescriptor, FieldType},
    value::{ToValue, Value},
};

/// Validate `value` against the expected fields, reporting failures under
/// `path`.
///
/// # Example
///
/// ```rust
/// use tysig::{FieldDescriptor, FieldPath, FieldType, Record, Value, validate};
///
/// let fields = [FieldDescriptor::new("question", FieldType::String).required()];
/// let value = Value::from(Record::new("Question").with("question", ""));
///
/// let err = validate(&value, &fields, &FieldPath::root("input")).unwrap_err();
/// assert_eq!(err.field_path(), "input.question");
/// ```
pub fn validate(
    value: &Value,
    expected: &[FieldDescriptor],
    path: &FieldPath,
) -> ValidationResult<()> {
    validate_fields(value, expected.iter(), path)
}

/// Validate an optional typed value. `None` is an absent value.
pub fn validate_typed<T: ToValue + ?Sized>(
    value: Option<&T>,
    expected: &[FieldDescriptor],
    path: &FieldPath,
) -> ValidationResult<()> {
    let value = value.map_or(Value::Null, ToValue::to_value);
    validate(&value, expected, path)
}

fn validate_fields<'a>(
    value: &Value,
    expected: impl Iterator<Item = &'a FieldDescriptor>,
    path: &FieldPath,
) -> ValidationResult<()> {
    let record = match value.resolve() {
        Value::Null => return Err(ValidationError::empty_value(path)),
        Value::Record(record) => record,
        other => return Err(ValidationError::not_a_struct(path, other.kind_name())),
    };

    for field in expected.filter(|field| field.required) {
        let found = match record.get(&field.binding) {
            Some(found) if !found.is_zero() => found,
            _ => return Err(ValidationError::required_field_missing(path, &field.name)),
        };

        if field.field_type == FieldType::Object {
            validate_fields(found, field.flattened_properties(), &path.child(&field.name))?;
        }
    }

    Ok(())
}
