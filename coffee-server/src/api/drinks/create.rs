use crate::errors::ApiError;
use crate::models::{DrinkPayload, DrinksResponse, ShortDrink};
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::Extension;
use coffee_auth::ClaimSet;
use log::{info, warn};

#[utoipa::path(
    post,
    path = "/drinks",
    tag = DRINKS_TAG,
    request_body = DrinkPayload,
    params(
        ("Authorization" = String, Header, description = "Bearer token with `post:drinks`"),
    ),
    responses(
        (status = 200, description = "Drink created", body = DrinksResponse<ShortDrink>),
        (status = 400, description = "Title or recipe missing"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Permission not granted"),
        (status = 422, description = "Duplicate title or unusable payload")
    )
)]
pub(crate) async fn create_drink(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimSet>,
    payload: Result<Json<DrinkPayload>, JsonRejection>,
) -> Result<Json<DrinksResponse<ShortDrink>>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!("Rejected drink payload: {rejection}");
        ApiError::UnprocessableEntity
    })?;

    let (Some(title), Some(recipe)) = (payload.title, payload.recipe) else {
        return Err(ApiError::BadRequest);
    };

    let existing = state
        .store
        .find_by_title(&title)
        .await
        .map_err(ApiError::unprocessable)?;
    if existing.is_some() {
        warn!("Drink '{title}' already exists");
        return Err(ApiError::UnprocessableEntity);
    }

    let drink = state
        .store
        .insert(&title, &recipe)
        .await
        .map_err(ApiError::unprocessable)?;

    info!(
        "Subject '{}' created drink {} '{}'",
        claims.subject(),
        drink.id,
        drink.title
    );
    Ok(Json(DrinksResponse::new(vec![drink.short()])))
}
