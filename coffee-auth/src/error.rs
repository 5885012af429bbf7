use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Reasons a request can be rejected by the authorization layer.
///
/// Every variant except [`AuthError::Forbidden`] and
/// [`AuthError::KeyDirectoryUnavailable`] is an authentication failure and maps
/// to 401. A rejected request never reaches the wrapped handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,
    #[error("Authorization header must be a bearer token.")]
    MalformedHeader,
    #[error("Authorization malformed.")]
    MalformedToken,
    #[error("Unable to find the appropriate key.")]
    UnknownKey,
    #[error("Token signature could not be verified.")]
    BadSignature,
    #[error("Token expired.")]
    Expired,
    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,
    #[error("Permissions not included in JWT.")]
    PermissionsClaimMissing,
    #[error("Permission not found: {0}")]
    Forbidden(String),
    #[error("Signing keys are temporarily unavailable.")]
    KeyDirectoryUnavailable,
}

impl AuthError {
    /// HTTP status code used when this error is returned to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::KeyDirectoryUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Stable machine readable name, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader => "authorization_header_missing",
            Self::MalformedHeader => "invalid_header",
            Self::MalformedToken => "invalid_token",
            Self::UnknownKey => "unknown_key",
            Self::BadSignature => "invalid_signature",
            Self::Expired => "token_expired",
            Self::InvalidClaims => "invalid_claims",
            Self::PermissionsClaimMissing => "permissions_missing",
            Self::Forbidden(_) => "forbidden",
            Self::KeyDirectoryUnavailable => "key_directory_unavailable",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
