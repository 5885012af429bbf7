use crate::errors::ApiError;
use crate::models::{Drink, DrinksResponse, LongDrink, ShortDrink};
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use axum::extract::{Json, State};
use axum::Extension;
use coffee_auth::ClaimSet;
use log::debug;

/// All drinks ascending by id; an empty menu is reported as not found
async fn load_menu(state: &AppState) -> Result<Vec<Drink>, ApiError> {
    let drinks = state.store.list().await.map_err(|e| {
        log::error!("Failed to list drinks: {e}");
        ApiError::Internal
    })?;

    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(drinks)
}

#[utoipa::path(
    get,
    path = "/drinks",
    tag = DRINKS_TAG,
    responses(
        (status = 200, description = "All drinks without ingredient names", body = DrinksResponse<ShortDrink>),
        (status = 404, description = "No drinks on the menu"),
        (status = 500, description = "Internal server error")
    )
)]
pub(crate) async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse<ShortDrink>>, ApiError> {
    let drinks = load_menu(&state).await?;
    Ok(Json(DrinksResponse::new(
        drinks.iter().map(Drink::short).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = DRINKS_TAG,
    params(
        ("Authorization" = String, Header, description = "Bearer token with `get:drinks-detail`"),
    ),
    responses(
        (status = 200, description = "All drinks with full recipes", body = DrinksResponse<LongDrink>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Permission not granted"),
        (status = 404, description = "No drinks on the menu"),
        (status = 500, description = "Internal server error")
    )
)]
pub(crate) async fn list_drink_details(
    State(state): State<AppState>,
    Extension(claims): Extension<ClaimSet>,
) -> Result<Json<DrinksResponse<LongDrink>>, ApiError> {
    debug!("Listing drink details for '{}'", claims.subject());
    let drinks = load_menu(&state).await?;
    Ok(Json(DrinksResponse::new(
        drinks.iter().map(Drink::long).collect(),
    )))
}
