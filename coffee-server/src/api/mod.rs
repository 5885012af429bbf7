pub(crate) mod drinks;
pub(crate) mod health;

use crate::errors::ApiError;
use crate::state::AppState;
use axum::Router;

/// Combines all drink routes into a single router
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(drinks::router(state))
        .fallback(not_found)
}

/// Unmatched paths get the same envelope as a missing drink
async fn not_found() -> ApiError {
    ApiError::NotFound
}
