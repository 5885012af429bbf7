//! Sources of token verification keys.
//!
//! Keys are published by the identity provider as a JSON Web Key Set and
//! indexed by key identifier (`kid`).

use crate::error::AuthError;
use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::DecodingKey;
use log::{debug, error, warn};
use moka::future::Cache as MokaCache;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching the key directory
#[derive(Debug, Error)]
pub enum KeyFetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Verification keys indexed by key identifier
#[derive(Clone, Default)]
pub struct KeyDirectory {
    keys: HashMap<String, DecodingKey>,
}

impl KeyDirectory {
    /// Build a directory from a JWK set.
    ///
    /// Keys without a `kid` or with unsupported parameters are skipped.
    pub fn from_jwk_set(set: &JwkSet) -> Self {
        let mut keys = HashMap::with_capacity(set.keys.len());
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.as_ref() else {
                warn!("Skipping signing key without a key id");
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(kid.clone(), key);
                }
                Err(e) => warn!("Skipping signing key '{}': {}", kid, e),
            }
        }
        Self { keys }
    }

    pub fn get(&self, kid: &str) -> Option<&DecodingKey> {
        self.keys.get(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Resolves the key a token claims to be signed with.
///
/// `Ok(None)` means the directory was available but holds no key for `kid`.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn key(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError>;
}

/// Fixed, known-good key set held in memory
#[derive(Clone)]
pub struct StaticKeySource {
    directory: Arc<KeyDirectory>,
}

impl StaticKeySource {
    pub fn new(set: &JwkSet) -> Self {
        Self {
            directory: Arc::new(KeyDirectory::from_jwk_set(set)),
        }
    }

    /// Parse a JWKS document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let set: JwkSet = serde_json::from_str(json)?;
        Ok(Self::new(&set))
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn key(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError> {
        Ok(self.directory.get(kid).cloned())
    }
}

/// Key directory fetched from the issuer's JWKS endpoint.
///
/// The parsed directory is cached for `ttl`; concurrent lookups on a cold
/// cache share a single fetch. Failed fetches are not cached.
#[derive(Clone)]
pub struct RemoteKeySource {
    client: Client,
    url: String,
    cache: MokaCache<String, Arc<KeyDirectory>>,
}

impl RemoteKeySource {
    pub fn new(client: Client, url: impl Into<String>, ttl: Duration) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(ttl)
            .max_capacity(16)
            .build();

        Self {
            client,
            url: url.into(),
            cache,
        }
    }

    /// Current key directory, fetched if the cached copy is missing or expired
    pub async fn directory(&self) -> Result<Arc<KeyDirectory>, AuthError> {
        self.cache
            .try_get_with(self.url.clone(), self.fetch())
            .await
            .map_err(|e| {
                error!("Failed to fetch signing keys from {}: {}", self.url, e);
                AuthError::KeyDirectoryUnavailable
            })
    }

    async fn fetch(&self) -> Result<Arc<KeyDirectory>, KeyFetchError> {
        debug!("Fetching signing keys from {}", self.url);

        let set: JwkSet = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let directory = KeyDirectory::from_jwk_set(&set);
        if directory.is_empty() {
            warn!("Key directory at {} contains no usable keys", self.url);
        } else {
            debug!("Fetched {} signing keys from {}", directory.len(), self.url);
        }
        Ok(Arc::new(directory))
    }
}

#[async_trait]
impl KeySource for RemoteKeySource {
    async fn key(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError> {
        Ok(self.directory().await?.get(kid).cloned())
    }
}
