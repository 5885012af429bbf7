use crate::openapi::HEALTH_TAG;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Basic health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Health {
    status: String,
}

impl Health {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    fn error() -> Self {
        Self {
            status: "error".to_string(),
        }
    }
}

/// Liveness check handler
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is alive", body = Health)
    )
)]
async fn health_check() -> impl IntoResponse {
    Json(Health::ok())
}

/// Readiness check handler, queries the drink store
#[utoipa::path(
    get,
    path = "/ready",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is ready", body = Health),
        (status = 503, description = "Drink store is unreachable", body = Health)
    )
)]
async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.health_check().await {
        (StatusCode::OK, Json(Health::ok()))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(Health::error()))
    }
}

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(ready_check))
}
