use validator::{ValidationError, ValidationErrors};

use crate::domain::error::AppError;

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Turns validator output into a user-facing error naming the missing fields.
///
/// `fields` pairs each struct field name with the label shown to users and
/// fixes the order in which labels are listed. Errors keyed by the camelCase
/// wire name are matched as well.
pub fn required_fields_error(errors: &ValidationErrors, fields: &[(&str, &str)]) -> AppError {
    let field_errors = errors.field_errors();
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(field, _)| {
            field_errors.contains_key(*field) || field_errors.contains_key(camel_case(field).as_str())
        })
        .map(|(_, label)| *label)
        .collect();

    let message = match missing.as_slice() {
        [] => format!("Invalid request: {}", errors),
        [only] => format!("{} is required.", only),
        [init @ .., last] => format!("{} and {} are required.", init.join(", "), last),
    };
    AppError::ValidationError(message)
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
