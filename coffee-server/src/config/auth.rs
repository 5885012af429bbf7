//! Identity provider configuration

use coffee_auth::Algorithm;
use confique::Config;
use std::str::FromStr;

/// Configuration of the identity provider whose tokens are accepted
#[derive(Debug, Config, Clone)]
pub struct AuthConfig {
    /// Expected `iss` claim, e.g. https://tenant.auth0.com/ (required)
    #[config(env = "COFFEE_AUTH_ISSUER")]
    pub issuer: String,

    /// Expected `aud` claim (required)
    #[config(env = "COFFEE_AUTH_AUDIENCE")]
    pub audience: String,

    /// URL of the issuer's JWKS document
    /// (default: <issuer>/.well-known/jwks.json)
    #[config(env = "COFFEE_AUTH_JWKS_URL")]
    pub jwks_url: Option<String>,

    /// Accepted signing algorithms, comma-separated (default: "RS256")
    #[config(env = "COFFEE_AUTH_ALGORITHMS", default = "RS256")]
    pub algorithms: String,

    /// How long a fetched key set is reused, in seconds (default: 600)
    #[config(env = "COFFEE_AUTH_JWKS_CACHE_TTL", default = 600)]
    pub jwks_cache_ttl: u64,

    /// Timeout for fetching the key set in seconds (default: 5)
    #[config(env = "COFFEE_AUTH_JWKS_TIMEOUT", default = 5)]
    pub jwks_timeout: u64,

    /// Clock leeway for `exp` and `nbf` in seconds (default: 0)
    #[config(env = "COFFEE_AUTH_LEEWAY", default = 0)]
    pub leeway: u64,
}

impl AuthConfig {
    /// Get the JWKS URL, derived from the issuer when not set explicitly
    pub fn get_jwks_url(&self) -> String {
        match &self.jwks_url {
            Some(url) => url.clone(),
            None => format!(
                "{}/.well-known/jwks.json",
                self.issuer.trim_end_matches('/')
            ),
        }
    }

    /// Get the accepted algorithms as a vector
    pub fn get_algorithms(&self) -> Result<Vec<Algorithm>, String> {
        self.algorithms
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Algorithm::from_str(s).map_err(|_| format!("unknown signing algorithm '{s}'")))
            .collect()
    }
}
