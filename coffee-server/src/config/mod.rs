pub(crate) use crate::config::auth::AuthConfig;
pub(crate) use crate::config::database::DatabaseConfig;
use confique::Config;
use thiserror::Error;
use url::Url;

pub mod auth;
pub mod database;

/// Optional configuration file, overridden by environment variables
const CONFIG_FILE: &str = "coffee.toml";

/// Errors that can occur while loading the configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{0}")]
    Load(#[from] confique::Error),
    #[error("invalid {field} URL '{value}': {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
    #[error("invalid auth settings: {0}")]
    InvalidAuth(String),
}

/// Main configuration structure for the coffee shop server
#[derive(Debug, Config, Clone)]
pub struct Settings {
    /// The port the server will listen to (default: 5000)
    #[config(env = "COFFEE_PORT", default = 5000)]
    pub port: u16,

    /// Drink store configuration
    #[config(nested)]
    pub database: DatabaseConfig,

    /// Identity provider configuration
    #[config(nested)]
    pub auth: AuthConfig,
}

impl Settings {
    /// Load the configuration from `coffee.toml` (if present) and `COFFEE_*`
    /// environment variables, environment taking precedence
    pub fn new() -> Result<Self, SettingsError> {
        let settings = Self::builder().env().file(CONFIG_FILE).load()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that would only fail once the first request arrives
    pub fn validate(&self) -> Result<(), SettingsError> {
        parse_url("issuer", &self.auth.issuer)?;
        parse_url("JWKS", &self.auth.get_jwks_url())?;

        let algorithms = self
            .auth
            .get_algorithms()
            .map_err(SettingsError::InvalidAuth)?;
        if algorithms.is_empty() {
            return Err(SettingsError::InvalidAuth(
                "at least one signing algorithm is required".to_string(),
            ));
        }
        if self.auth.audience.is_empty() {
            return Err(SettingsError::InvalidAuth(
                "audience must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn for_test_with_mocks(jwks_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            database: DatabaseConfig::in_memory(),
            auth: AuthConfig {
                issuer: "https://coffee.test/".to_string(),
                audience: "drinks".to_string(),
                jwks_url: Some(format!("{}/.well-known/jwks.json", jwks_mock.uri())),
                algorithms: "RS256".to_string(),
                jwks_cache_ttl: 600,
                jwks_timeout: 5,
                leeway: 0,
            },
        }
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })
}
