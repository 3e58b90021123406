//! Field-level validation errors for create inputs.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input rejected by a domain rule.
///
/// `field` is the JSON path of the offending value, e.g. `phones[1].number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_text(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

/// Trims optional free text, mapping blank values to `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

pub(crate) fn check_latitude(field: &str, value: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&value) {
        return Err(ValidationError::new(
            field,
            format!("latitude must be within [-90, 90], got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_longitude(field: &str, value: f64) -> Result<(), ValidationError> {
    if !(-180.0..=180.0).contains(&value) {
        return Err(ValidationError::new(
            field,
            format!("longitude must be within [-180, 180], got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_latitude, check_longitude, optional_text, require_text};

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("name", "  Tower ".to_string()).unwrap(), "Tower");
        let err = require_text("name", " \t".to_string()).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" x ".to_string())).as_deref(), Some("x"));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn coordinate_bounds_are_inclusive() {
        assert!(check_latitude("latitude", 90.0).is_ok());
        assert!(check_latitude("latitude", -90.0).is_ok());
        assert!(check_latitude("latitude", 90.0001).is_err());
        assert!(check_longitude("longitude", -180.0).is_ok());
        assert!(check_longitude("longitude", 180.5).is_err());
        assert!(check_latitude("latitude", f64::NAN).is_err());
    }
}
