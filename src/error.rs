//! Error types for node construction and validation

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Figure schema errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid construction argument for {type_path}: expected {expected}, got {found}")]
    Construction {
        type_path: String,
        expected: &'static str,
        found: String,
    },

    #[error("Invalid value for '{field}' property of '{parent_path}': {reason}")]
    Validation {
        field: String,
        parent_path: String,
        reason: String,
        /// Permitted values, populated for enumerated fields
        allowed: Vec<String>,
    },

    #[error("Invalid property '{field}' for object of type {type_path}{}", did_you_mean(.suggestion))]
    UnknownField {
        field: String,
        type_path: String,
        suggestion: Option<String>,
    },

    #[error("Invalid property path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Unknown schema path: {path}{}", did_you_mean(.suggestion))]
    UnknownSchema {
        path: String,
        suggestion: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    /// Whether `skip_invalid` may swallow this error
    pub fn is_validation(&self) -> bool {
        matches!(self, SchemaError::Validation { .. })
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_message_with_suggestion() {
        let err = SchemaError::UnknownField {
            field: "colr".to_string(),
            type_path: "layout.xaxis".to_string(),
            suggestion: Some("color".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Invalid property 'colr' for object of type layout.xaxis (did you mean 'color'?)"
        );
    }

    #[test]
    fn test_validation_is_skippable() {
        let err = SchemaError::Validation {
            field: "x".to_string(),
            parent_path: "isosurface.slices".to_string(),
            reason: "bad".to_string(),
            allowed: Vec::new(),
        };
        assert!(err.is_validation());

        let err = SchemaError::Construction {
            type_path: "isosurface.slices".to_string(),
            expected: "mapping or compatible node instance",
            found: "number".to_string(),
        };
        assert!(!err.is_validation());
    }
}
