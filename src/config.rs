//! Configuration for PUMAPI connections.
//!
//! Provides the connection parameters (endpoint, key, timeout) and the
//! facility-level defaults used when building typed records.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EXPIRY_DAYS;
use crate::{Error, Result};

/// Connection configuration for a PUMAPI endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PumapiConfig {
    /// Full URL of the PUMAPI endpoint (e.g. `https://ppms.example.org/pumapi/`)
    pub base_url: String,

    /// API key used to authenticate every request
    pub api_key: String,

    /// How many seconds to wait for the server before giving up
    pub timeout_secs: u64,

    /// Core facility ref used for running sheet requests
    pub core_facility_id: u32,

    /// Lower bound applied to user account expiry, in days
    pub default_expiry_days: u32,
}

impl Default for PumapiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: 10,
            core_facility_id: 2,
            default_expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }
}

impl PumapiConfig {
    /// Create a configuration for the given endpoint and API key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the core facility ref used for running sheet requests
    pub fn with_core_facility_id(mut self, core_facility_id: u32) -> Self {
        self.core_facility_id = core_facility_id;
        self
    }

    /// Set the lower bound for user account expiry
    pub fn with_default_expiry_days(mut self, days: u32) -> Self {
        self.default_expiry_days = days;
        self
    }

    /// Validate that the configuration is usable for opening a connection
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::configuration("base_url must not be empty"));
        }
        if self.api_key.trim().is_empty() {
            return Err(Error::configuration("api_key must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PumapiConfig::default();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.default_expiry_days, DEFAULT_EXPIRY_DAYS);
    }

    #[test]
    fn test_builder_chain() {
        let config = PumapiConfig::new("https://ppms.example.org/pumapi/", "secret")
            .with_timeout_secs(30)
            .with_core_facility_id(4);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.core_facility_id, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_missing_values() {
        assert!(PumapiConfig::default().validate().is_err());
        assert!(PumapiConfig::new("", "key").validate().is_err());
        assert!(PumapiConfig::new("https://x", "").validate().is_err());
    }
}
