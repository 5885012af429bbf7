use utoipa::OpenApi;

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const DRINKS_TAG: &str = "Drinks API";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::drinks::list::list_drinks,
        crate::api::drinks::list::list_drink_details,
        crate::api::drinks::create::create_drink,
        crate::api::drinks::update::update_drink,
        crate::api::drinks::delete::delete_drink,
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = DRINKS_TAG, description = "Drink menu endpoints"),
    ),
    info(
        title = "Coffee Shop API",
        description = "Drink menu with permission-based access",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;
