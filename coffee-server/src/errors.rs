use crate::store::StoreError;
use axum::response::IntoResponse;
use axum::Json;
use coffee_auth::AuthError;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Errors returned by the drink handlers.
///
/// Every variant renders as `{"success": false, "error": <status>, "message": <text>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("unprocessable")]
    UnprocessableEntity,
    #[error("internal server error")]
    Internal,
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(err) => err.status_code(),
        }
    }

    /// Log a store failure on a write path and hide it behind a 422
    pub fn unprocessable(err: StoreError) -> Self {
        log::error!("Store operation failed: {err}");
        ApiError::UnprocessableEntity
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Auth(err) = self {
            return err.into_response();
        }

        let status_code = self.status_code();
        let body = json!({
            "success": false,
            "error": status_code.as_u16(),
            "message": self.to_string(),
        });
        (status_code, Json(body)).into_response()
    }
}
