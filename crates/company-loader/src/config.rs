//! Loader configuration defaults
//!
//! Values come from CLI flags, which fall back to environment variables
//! (optionally from a `.env` file) and then to these defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Default company server URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default directory holding the three CSV files.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default timeout for a single API request in seconds.
/// Large employee loads are committed in many batches, so this is generous.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 300;

/// Status a stage must answer with to count as successful.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub timeout_secs: u64,
    pub expected_status: u16,
}

impl LoaderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(crate::LoaderError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(crate::LoaderError::Config(
                "API timeout must be greater than 0".to_string(),
            ));
        }

        if !(100..=599).contains(&self.expected_status) {
            return Err(crate::LoaderError::Config(format!(
                "Expected status must be a valid HTTP status code, got {}",
                self.expected_status
            )));
        }

        Ok(())
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            expected_status: DEFAULT_EXPECTED_STATUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LoaderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = LoaderConfig {
            api_url: "localhost:8000".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LoaderConfig {
            expected_status: 42,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LoaderConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
