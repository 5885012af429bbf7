use crate::config::Settings;
use crate::store::{DrinkStore, StoreError};
use coffee_auth::{Guard, RemoteKeySource, TokenVerifier};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that prevent the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open drink store: {0}")]
    Store(#[from] StoreError),
    #[error("failed to create JWKS client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("invalid auth settings: {0}")]
    Auth(String),
}

#[derive(Clone)]
pub struct AppState {
    pub store: DrinkStore,
    pub verifier: TokenVerifier,
}

impl AppState {
    fn create_jwks_client(timeout: u64) -> Result<Client, reqwest::Error> {
        Client::builder()
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(2))
            // Only one host is ever contacted
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
    }

    fn create_verifier(settings: &Settings) -> Result<TokenVerifier, StartupError> {
        let auth = &settings.auth;
        let client = AppState::create_jwks_client(auth.jwks_timeout)?;
        let keys = RemoteKeySource::new(
            client,
            auth.get_jwks_url(),
            Duration::from_secs(auth.jwks_cache_ttl),
        );
        let algorithms = auth.get_algorithms().map_err(StartupError::Auth)?;

        Ok(
            TokenVerifier::new(Arc::new(keys), &auth.issuer, &auth.audience)
                .with_algorithms(algorithms)
                .with_leeway(auth.leeway),
        )
    }

    /// Open the store (resetting it when configured) and build the verifier
    pub async fn new(settings: &Settings) -> Result<Self, StartupError> {
        let store = DrinkStore::connect(&settings.database).await?;
        if settings.database.reset_on_start {
            store.reset().await?;
        }

        Ok(Self {
            store,
            verifier: AppState::create_verifier(settings)?,
        })
    }

    /// Guard requiring the given permission, backed by the shared verifier
    pub fn guard(&self, permission: &'static str) -> Guard {
        Guard::new(self.verifier.clone(), permission)
    }

    /// Check if all components are healthy
    pub async fn health_check(&self) -> bool {
        match self.store.health_check().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Drink store is not healthy: {e}");
                false
            }
        }
    }
}
