//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod mail;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, StoreBackend};
pub use self::logging::LoggingConfig;
pub use self::mail::MailConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay) and
/// `MAKERHUB__*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Store connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token signing settings.
    pub auth: AuthConfig,
    /// Outbound mail settings.
    #[serde(default)]
    pub mail: MailConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default.toml`, the `config/{env}.toml` overlay and
    /// environment variables prefixed with `MAKERHUB__`, then validates
    /// the result.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MAKERHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server must not start with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.len() < auth::MIN_SECRET_LEN {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be set and at least {} bytes long",
                auth::MIN_SECRET_LEN
            )));
        }

        if self.auth.claim_token_ttl_hours == 0
            || self.auth.claim_token_ttl_hours > auth::MAX_CLAIM_TTL_HOURS
        {
            return Err(AppError::configuration(format!(
                "auth.claim_token_ttl_hours must be between 1 and {}",
                auth::MAX_CLAIM_TTL_HOURS
            )));
        }

        if self.database.backend == StoreBackend::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres backend",
            ));
        }

        if self.database.operation_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "database.operation_timeout_seconds must be greater than zero",
            ));
        }

        Ok(())
    }
}
