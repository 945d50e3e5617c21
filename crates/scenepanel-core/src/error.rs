//! Error taxonomy for configuration compilation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field '{field}' in {location}")]
    MissingField { field: String, location: String },
    #[error("Field '{field}' in {location} must be {expected}")]
    InvalidField {
        field: String,
        location: String,
        expected: &'static str,
    },
    #[error("Unrecognized sensor type '{name}' in {location}")]
    UnrecognizedSensorType { name: String, location: String },
    #[error("Structural violation in {location}: {reason}")]
    StructuralViolation { location: String, reason: String },
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn missing(field: &str, location: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
            location: location.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, location: &str, expected: &'static str) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            location: location.to_string(),
            expected,
        }
    }

    /// Short category name used in boot diagnostics
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing field",
            Self::InvalidField { .. } => "invalid field",
            Self::UnrecognizedSensorType { .. } => "unrecognized sensor type",
            Self::StructuralViolation { .. } => "structural violation",
            Self::Parse(_) => "parse error",
            Self::Io(_) => "storage error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = ConfigError::missing("getTopic", "scenes[0].devices[1]");
        assert_eq!(
            err.to_string(),
            "Missing required field 'getTopic' in scenes[0].devices[1]"
        );
        assert_eq!(err.category(), "missing field");
    }

    #[test]
    fn test_invalid_field_message() {
        let err = ConfigError::invalid("jsondata", "scenes[2].devices[0]", "a boolean");
        assert_eq!(
            err.to_string(),
            "Field 'jsondata' in scenes[2].devices[0] must be a boolean"
        );
    }
}
