use crate::claims::{extract_permissions, ClaimSet};
use crate::error::AuthError;
use crate::header::bearer_token;
use crate::verifier::TokenVerifier;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;
use log::{debug, warn};
use std::sync::Arc;

/// Requirement that the caller holds one specific permission.
///
/// Attach it to a route with
/// `axum::middleware::from_fn_with_state(guard, authorize)`.
#[derive(Clone)]
pub struct Guard {
    verifier: TokenVerifier,
    permission: Arc<str>,
}

impl Guard {
    pub fn new(verifier: TokenVerifier, permission: impl Into<Arc<str>>) -> Self {
        Self {
            verifier,
            permission: permission.into(),
        }
    }

    /// Authenticate the request headers and check the permission.
    ///
    /// The first failing step short-circuits; errors from the verifier and
    /// the permission extractor are returned unchanged.
    pub async fn check(&self, headers: &HeaderMap) -> Result<ClaimSet, AuthError> {
        let token = bearer_token(headers)?;
        let claims = self.verifier.verify(token).await?;

        let granted = extract_permissions(&claims).inspect_err(|_| {
            warn!(
                "Token for subject '{}' carries no permissions claim",
                claims.subject()
            );
        })?;

        if !granted.contains(&*self.permission) {
            warn!(
                "Subject '{}' lacks permission '{}'",
                claims.subject(),
                self.permission
            );
            return Err(AuthError::Forbidden(self.permission.to_string()));
        }

        debug!(
            "Subject '{}' authorized for '{}'",
            claims.subject(),
            self.permission
        );
        Ok(claims)
    }
}

/// Middleware enforcing a [`Guard`].
///
/// On success the verified [`ClaimSet`] is stored in the request extensions,
/// where handlers can read it with `Extension<ClaimSet>`.
pub async fn authorize(
    State(guard): State<Guard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = guard.check(request.headers()).await?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
