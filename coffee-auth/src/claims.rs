use crate::error::AuthError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Audience claim value, which can be a single string or array of strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    /// Check if the audience contains a specific value.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Audience::Single(s) => s == value,
            Audience::Multiple(v) => v.iter().any(|s| s == value),
        }
    }
}

/// Claims of a token that passed signature, expiry, audience and issuer checks.
///
/// A `ClaimSet` is only ever produced by
/// [`TokenVerifier::verify`](crate::TokenVerifier::verify).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaimSet {
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: Audience,
    /// Expiration time (unix timestamp)
    pub exp: u64,
    /// Subject (user or client identifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Permissions granted by the identity provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    /// Claims not covered above
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ClaimSet {
    /// Subject for audit logs, `"unknown"` when the token carries none
    pub fn subject(&self) -> &str {
        self.sub.as_deref().unwrap_or("unknown")
    }
}

/// Read the `permissions` claim.
///
/// A token without the claim points at a misconfigured issuer or API, which
/// is reported as [`AuthError::PermissionsClaimMissing`] rather than as a
/// denied permission. Values are returned verbatim.
pub fn extract_permissions(claims: &ClaimSet) -> Result<HashSet<String>, AuthError> {
    claims
        .permissions
        .as_ref()
        .map(|permissions| permissions.iter().cloned().collect())
        .ok_or(AuthError::PermissionsClaimMissing)
}
