//! Suite configuration parsing and validation.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{AppError, Result};

/// Inclusive id range the randomized fixtures draw from.
///
/// A bounded range reduces (but does not eliminate) collisions with
/// pre-existing or concurrently-created records in the backing dataset.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct RandomIdRange {
    /// Lowest id the generator may produce.
    #[serde(default = "default_id_min")]
    pub min: i64,
    /// Highest id the generator may produce.
    #[serde(default = "default_id_max")]
    pub max: i64,
}

impl Default for RandomIdRange {
    fn default() -> Self {
        Self {
            min: default_id_min(),
            max: default_id_max(),
        }
    }
}

fn default_id_min() -> i64 {
    100
}

fn default_id_max() -> i64 {
    200
}

fn default_base_url() -> String {
    "https://fakerestapi.azurewebsites.net/api/v1".into()
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_expected_book_count() -> usize {
    200
}

/// Suite configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SuiteConfig {
    /// Base URL of the API under test, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Default per-call timeout in seconds.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    /// Number of entries the seeded book catalog is expected to hold.
    #[serde(default = "default_expected_book_count")]
    pub expected_book_count: usize,
    /// Id range for randomized fixtures.
    #[serde(default)]
    pub random_ids: RandomIdRange,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
            expected_book_count: default_expected_book_count(),
            random_ids: RandomIdRange::default(),
        }
    }
}

impl SuiteConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and normalize the base URL.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&mut self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(AppError::Config("base_url must not be empty".into()));
        }

        // Endpoint paths are joined with a leading slash.
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }

        if self.request_timeout_seconds == 0 {
            return Err(AppError::Config(
                "request_timeout_seconds must be greater than zero".into(),
            ));
        }

        if self.expected_book_count == 0 {
            return Err(AppError::Config(
                "expected_book_count must be greater than zero".into(),
            ));
        }

        if self.random_ids.min > self.random_ids.max {
            return Err(AppError::Config(format!(
                "random_ids.min ({}) must not exceed random_ids.max ({})",
                self.random_ids.min, self.random_ids.max
            )));
        }

        Ok(())
    }
}
