//! Validation Utilities

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors = Vec::new();
    collect_field_errors(&errors, "", &mut field_errors);
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    let message = field_errors
        .first()
        .map(|e| format!("{}: {}", e.field, e.message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation {
        message,
        errors: field_errors,
    }
}

/// Flatten nested struct and list errors into dotted field paths, using the
/// camelCase names the request bodies are written in.
fn collect_field_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let field = to_camel_case(field);
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

/// `street_name` -> `streetName`
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Validate every item of a batch request body, reporting the first failure
/// with its position in the batch.
pub fn validate_batch<T: Validate>(items: &[T]) -> Result<(), AppError> {
    for (index, item) in items.iter().enumerate() {
        if let Err(errors) = item.validate() {
            return Err(match validation_error(errors) {
                AppError::Validation { message, errors } => AppError::Validation {
                    message: format!("[{}] {}", index, message),
                    errors,
                },
                other => other,
            });
        }
    }
    Ok(())
}

/// Reject a present-but-empty optional field.
pub fn require_non_empty(value: Option<&str>, label: &str) -> Result<(), String> {
    match value {
        Some(v) if v.is_empty() => Err(format!("{} cannot be empty", label)),
        _ => Ok(()),
    }
}
