use crate::errors::ApiError;
use crate::models::DeletedResponse;
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use axum::extract::rejection::PathRejection;
use axum::extract::{Json, Path, State};
use axum::Extension;
use coffee_auth::ClaimSet;
use log::info;

#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    tag = DRINKS_TAG,
    params(
        ("id" = i64, Path, description = "Drink identifier"),
        ("Authorization" = String, Header, description = "Bearer token with `delete:drinks`"),
    ),
    responses(
        (status = 200, description = "Drink deleted", body = DeletedResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Permission not granted"),
        (status = 404, description = "Unknown drink"),
        (status = 422, description = "Store failure")
    )
)]
pub(crate) async fn delete_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimSet>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;

    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(ApiError::unprocessable)?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    info!("Subject '{}' deleted drink {id}", claims.subject());
    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
    }))
}
