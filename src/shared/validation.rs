//! Validation Utilities

use validator::{Validate, ValidationErrors};

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", e.code)),
            })
        })
        .collect();
    // HashMap iteration order is unstable; keep responses deterministic.
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

/// Run `validator` checks on a request body.
pub fn validate<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(validation_error)
}

/// Reject negative money amounts.
pub fn non_negative(value: &rust_decimal::Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = validator::ValidationError::new("non_negative");
        err.message = Some("Must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Driver ratings are one decimal place on a 0-5 scale.
pub fn rating(value: &rust_decimal::Decimal) -> Result<(), validator::ValidationError> {
    if *value < rust_decimal::Decimal::ZERO || *value > rust_decimal::Decimal::from(5) {
        let mut err = validator::ValidationError::new("rating");
        err.message = Some("Rating must be between 0 and 5".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 2, message = "Too short"))]
        name: String,
        #[validate(length(min = 6, message = "Too short"))]
        secret: String,
    }

    #[test]
    fn test_validation_error_collects_all_fields_sorted() {
        let sample = Sample {
            name: "a".into(),
            secret: "b".into(),
        };
        match validate(&sample) {
            Err(AppError::Validation { message, errors }) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[1].field, "secret");
                assert_eq!(message, "name: Too short");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_body_passes() {
        let sample = Sample {
            name: "ok".into(),
            secret: "longenough".into(),
        };
        assert!(validate(&sample).is_ok());
    }

    #[test]
    fn test_non_negative() {
        assert!(non_negative(&Decimal::from_str("0").unwrap()).is_ok());
        assert!(non_negative(&Decimal::from_str("12.50").unwrap()).is_ok());
        assert!(non_negative(&Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(rating(&Decimal::from_str("0").unwrap()).is_ok());
        assert!(rating(&Decimal::from_str("4.8").unwrap()).is_ok());
        assert!(rating(&Decimal::from_str("5.0").unwrap()).is_ok());
        assert!(rating(&Decimal::from_str("5.1").unwrap()).is_err());
        assert!(rating(&Decimal::from_str("-1").unwrap()).is_err());
    }
}
