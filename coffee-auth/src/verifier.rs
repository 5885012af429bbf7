use crate::claims::ClaimSet;
use crate::error::AuthError;
use crate::keys::KeySource;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

/// Verifies bearer tokens issued by a single identity provider.
///
/// Cloning is cheap; the key source is shared.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<dyn KeySource>,
    issuer: String,
    audience: String,
    algorithms: Vec<Algorithm>,
    leeway: u64,
}

impl TokenVerifier {
    /// Create a verifier accepting RS256 tokens with no clock leeway
    pub fn new(
        keys: Arc<dyn KeySource>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
            algorithms: vec![Algorithm::RS256],
            leeway: 0,
        }
    }

    /// Set the signing algorithms a token may declare
    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Set the clock leeway in seconds applied to `exp` and `nbf`
    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Verify a compact JWS token and return its claims.
    ///
    /// Structure is checked first, then the key is resolved by `kid`, then
    /// the signature, and only then expiry, issuer and audience.
    pub async fn verify(&self, token: &str) -> Result<ClaimSet, AuthError> {
        if token.split('.').count() != 3 {
            warn!("Token does not consist of three segments");
            return Err(AuthError::MalformedToken);
        }

        let header = decode_header(token).map_err(|e| {
            warn!("Failed to decode token header: {}", e);
            AuthError::MalformedToken
        })?;

        let kid = header.kid.as_deref().ok_or_else(|| {
            warn!("Token header has no key id");
            AuthError::MalformedToken
        })?;

        if !self.algorithms.contains(&header.alg) {
            warn!("Token declares disallowed algorithm {:?}", header.alg);
            return Err(AuthError::BadSignature);
        }

        let key = self.keys.key(kid).await?.ok_or_else(|| {
            warn!("No signing key found for kid '{}'", kid);
            AuthError::UnknownKey
        })?;

        // Decode loosely so that missing registered claims surface as
        // validation failures rather than payload parse errors.
        let data = decode::<Value>(token, &key, &self.validation(header.alg)).map_err(|e| {
            let err = classify(e.kind());
            warn!("Token rejected ({}): {}", err.code(), e);
            err
        })?;

        let claims: ClaimSet = serde_json::from_value(data.claims).map_err(|e| {
            warn!("Token payload has unexpected claim types: {}", e);
            AuthError::MalformedToken
        })?;

        debug!("Verified token for subject '{}'", claims.subject());
        Ok(claims)
    }

    fn validation(&self, algorithm: Algorithm) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;
        // Valid only while now < exp + leeway
        validation.reject_tokens_expiring_in_less_than = 1;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation
    }
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidRsaKey(_)
        | ErrorKind::InvalidEcdsaKey => AuthError::BadSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        _ => AuthError::MalformedToken,
    }
}
