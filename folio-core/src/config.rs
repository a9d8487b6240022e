//! Configuration types

use crate::{ConfigError, FolioResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time-to-live for cache entries.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Default id of the metadata singleton.
pub const DEFAULT_METADATA_ID: &str = "portfolio";

/// Store and service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolioConfig {
    /// TTL applied when a cache write does not name one.
    pub cache_default_ttl: Duration,
    /// Fixed id the metadata singleton is stored under.
    pub metadata_id: String,

    // Rate limiting
    pub rate_limit_enabled: bool,
    /// Writes per minute allowed per caller.
    pub rate_limit_per_minute: u32,
    /// Writes a caller may issue in a burst beyond the steady rate.
    pub rate_limit_burst: u32,

    /// Author recorded on versions when a write context names none.
    pub default_author: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            cache_default_ttl: DEFAULT_CACHE_TTL,
            metadata_id: DEFAULT_METADATA_ID.to_string(),
            rate_limit_enabled: true,
            rate_limit_per_minute: 60,
            rate_limit_burst: 10,
            default_author: "admin".to_string(),
        }
    }
}

impl FolioConfig {
    /// Create from environment variables with fallback to defaults.
    ///
    /// Environment variables:
    /// - `FOLIO_CACHE_TTL_SECS`: Default cache TTL in seconds (default: 300)
    /// - `FOLIO_METADATA_ID`: Id of the metadata singleton (default: portfolio)
    /// - `FOLIO_RATE_LIMIT_ENABLED`: "true" or "false" (default: true)
    /// - `FOLIO_RATE_LIMIT_PER_MINUTE`: Writes per minute per caller (default: 60)
    /// - `FOLIO_RATE_LIMIT_BURST`: Burst capacity (default: 10)
    /// - `FOLIO_DEFAULT_AUTHOR`: Fallback version author (default: admin)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_default_ttl: std::env::var("FOLIO_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_default_ttl),
            metadata_id: std::env::var("FOLIO_METADATA_ID").unwrap_or(defaults.metadata_id),
            rate_limit_enabled: std::env::var("FOLIO_RATE_LIMIT_ENABLED")
                .ok()
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(defaults.rate_limit_enabled),
            rate_limit_per_minute: std::env::var("FOLIO_RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate_limit_per_minute),
            rate_limit_burst: std::env::var("FOLIO_RATE_LIMIT_BURST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rate_limit_burst),
            default_author: std::env::var("FOLIO_DEFAULT_AUTHOR")
                .unwrap_or(defaults.default_author),
        }
    }

    /// Set the default cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_default_ttl = ttl;
        self
    }

    /// Enable or disable rate limiting.
    pub fn with_rate_limit(mut self, enabled: bool) -> Self {
        self.rate_limit_enabled = enabled;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> FolioResult<()> {
        if self.cache_default_ttl.is_zero() {
            return Err(invalid(
                "cache_default_ttl",
                format!("{:?}", self.cache_default_ttl),
                "cache_default_ttl must be positive",
            ));
        }

        if self.metadata_id.trim().is_empty() {
            return Err(invalid(
                "metadata_id",
                self.metadata_id.clone(),
                "metadata_id must not be blank",
            ));
        }

        if self.rate_limit_enabled && self.rate_limit_per_minute == 0 {
            return Err(invalid(
                "rate_limit_per_minute",
                self.rate_limit_per_minute.to_string(),
                "rate_limit_per_minute must be positive when rate limiting is enabled",
            ));
        }

        if self.rate_limit_enabled && self.rate_limit_burst == 0 {
            return Err(invalid(
                "rate_limit_burst",
                self.rate_limit_burst.to_string(),
                "rate_limit_burst must be positive when rate limiting is enabled",
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, value: String, reason: &str) -> crate::FolioError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value,
        reason: reason.to_string(),
    }
    .into()
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Any positive TTL with positive limits validates.
        #[test]
        fn prop_positive_values_validate(
            ttl_secs in 1u64..86_400,
            per_minute in 1u32..10_000,
            burst in 1u32..1_000,
        ) {
            let config = FolioConfig {
                cache_default_ttl: Duration::from_secs(ttl_secs),
                rate_limit_per_minute: per_minute,
                rate_limit_burst: burst,
                ..Default::default()
            };
            prop_assert!(config.validate().is_ok());
        }
    }
}
