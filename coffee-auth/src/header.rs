use crate::error::AuthError;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use log::warn;

/// Extract the raw token from an `Authorization: Bearer <token>` header.
///
/// The header must consist of exactly two space-separated parts and the
/// first one must be literally `Bearer`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or_else(|| {
        warn!("Missing Authorization header");
        AuthError::MissingHeader
    })?;

    let value = header.to_str().map_err(|e| {
        warn!("Failed to parse Authorization header to string: {}", e);
        AuthError::MalformedHeader
    })?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => {
            warn!("Invalid Authorization header format, expected 'Bearer <token>'");
            Err(AuthError::MalformedHeader)
        }
    }
}
