//! Error types for folio operations

use crate::ContentKind;
use std::fmt;
use thiserror::Error;

/// A single violated schema constraint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl Violation {
    /// Name of the field the violation refers to.
    pub fn field(&self) -> &str {
        match self {
            Violation::RequiredFieldMissing { field }
            | Violation::InvalidValue { field, .. }
            | Violation::OutOfRange { field, .. } => field,
        }
    }
}

/// A write payload was rejected by its kind's schema.
///
/// Carries every violated constraint, not only the first one found.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed for {kind}: {}", ViolationList(.violations))]
pub struct ValidationError {
    pub kind: ContentKind,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Check whether any violation names the given field.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field() == field)
    }
}

struct ViolationList<'a>(&'a [Violation]);

impl fmt::Display for ViolationList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage lock poisoned: {0}")]
    LockPoisoned(&'static str),
}

/// Rejections raised by the write gates in front of the store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Unauthorized: {action}")]
    Unauthorized { action: String },

    #[error("Rate limited: caller {caller_id}")]
    RateLimited { caller_id: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all folio errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FolioError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for folio operations.
pub type FolioResult<T> = Result<T, FolioError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = ValidationError {
            kind: ContentKind::Skill,
            violations: vec![
                Violation::RequiredFieldMissing {
                    field: "name".to_string(),
                },
                Violation::OutOfRange {
                    field: "level".to_string(),
                    value: 150,
                    min: 0,
                    max: 100,
                },
            ],
        };
        let msg = format!("{}", err);
        assert!(msg.contains("skill"));
        assert!(msg.contains("required field missing: name"));
        assert!(msg.contains("level out of range: 150 not in [0, 100]"));
        assert!(err.has_field("level"));
        assert!(!err.has_field("category"));
    }

    #[test]
    fn test_access_error_display() {
        let err = AccessError::RateLimited {
            caller_id: "10.0.0.1".to_string(),
        };
        assert!(format!("{}", err).contains("10.0.0.1"));

        let err = AccessError::Unauthorized {
            action: "upsert project".to_string(),
        };
        assert!(format!("{}", err).contains("upsert project"));
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "cache_default_ttl".to_string(),
            value: "0s".to_string(),
            reason: "must be positive".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("cache_default_ttl"));
        assert!(msg.contains("0s"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_folio_error_from_variants() {
        let storage = FolioError::from(StorageError::LockPoisoned("ledger"));
        assert!(matches!(storage, FolioError::Storage(_)));

        let validation = FolioError::from(ValidationError {
            kind: ContentKind::Project,
            violations: vec![],
        });
        assert!(matches!(validation, FolioError::Validation(_)));

        let access = FolioError::from(AccessError::Unauthorized {
            action: "delete".to_string(),
        });
        assert!(matches!(access, FolioError::Access(_)));

        let config = FolioError::from(ConfigError::InvalidValue {
            field: "x".to_string(),
            value: "y".to_string(),
            reason: "z".to_string(),
        });
        assert!(matches!(config, FolioError::Config(_)));
    }
}
