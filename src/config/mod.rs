//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `COHORT_RELEASE` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use cohort_release::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Lessons unlock at {}", config.release.default_release_time);
//! ```

mod database;
mod error;
mod logging;
mod release;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use release::ReleaseConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// in-memory configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Release gating policies
    #[serde(default)]
    pub release: ReleaseConfig,

    /// PostgreSQL connection, when the database adapters are used
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COHORT_RELEASE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `COHORT_RELEASE__RELEASE__FAILURE_POLICY=closed` -> `release.failure_policy`
    /// - `COHORT_RELEASE__DATABASE__URL=...` -> `database.url`
    /// - `COHORT_RELEASE__LOGGING__JSON=true` -> `logging.json`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COHORT_RELEASE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.release.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.logging.validate()?;
        Ok(())
    }
}
