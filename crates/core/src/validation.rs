//! Input validation helpers shared by the DTOs in `clientdesk-db`.
//!
//! DTOs derive [`validator::Validate`]; [`validate_input`] turns the derive's
//! nested error map into a flat, sorted list of [`FieldViolation`]s so the
//! HTTP layer can render field-level messages.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{CoreError, FieldViolation};

/// Run the derived validations on `input`, mapping failures to
/// [`CoreError::InvalidFields`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::InvalidFields(collect_violations(&errors)))
}

/// Custom validator: reject strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Flatten field errors into one violation per failing rule, ordered by field name.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| FieldViolation {
                field: field.clone(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("failed '{}' check", err.code)),
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}
