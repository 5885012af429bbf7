use crate::errors::ApiError;
use crate::models::{DrinkPayload, DrinksResponse, ShortDrink};
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::Extension;
use coffee_auth::ClaimSet;
use log::{info, warn};

#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    tag = DRINKS_TAG,
    request_body = DrinkPayload,
    params(
        ("id" = i64, Path, description = "Drink identifier"),
        ("Authorization" = String, Header, description = "Bearer token with `patch:drinks`"),
    ),
    responses(
        (status = 200, description = "Drink updated", body = DrinksResponse<ShortDrink>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Permission not granted"),
        (status = 404, description = "Unknown drink"),
        (status = 422, description = "Duplicate title or unusable payload")
    )
)]
pub(crate) async fn update_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimSet>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DrinkPayload>, JsonRejection>,
) -> Result<Json<DrinksResponse<ShortDrink>>, ApiError> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;

    let mut drink = state
        .store
        .find(id)
        .await
        .map_err(ApiError::unprocessable)?
        .ok_or(ApiError::NotFound)?;

    let Json(payload) = payload.map_err(|rejection| {
        warn!("Rejected drink payload: {rejection}");
        ApiError::UnprocessableEntity
    })?;

    if let Some(title) = payload.title {
        if title != drink.title {
            let conflict = state
                .store
                .find_by_title(&title)
                .await
                .map_err(ApiError::unprocessable)?;
            if conflict.is_some() {
                warn!("Cannot rename drink {id}: '{title}' already exists");
                return Err(ApiError::UnprocessableEntity);
            }
        }
        drink.title = title;
    }
    if let Some(recipe) = payload.recipe {
        drink.recipe = recipe;
    }

    // The drink may have been deleted since it was read
    let updated = state
        .store
        .update(&drink)
        .await
        .map_err(ApiError::unprocessable)?;
    if !updated {
        return Err(ApiError::NotFound);
    }

    info!("Subject '{}' updated drink {}", claims.subject(), drink.id);
    Ok(Json(DrinksResponse::new(vec![drink.short()])))
}
