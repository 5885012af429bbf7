pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod list;
pub(crate) mod update;

use crate::state::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{self, get, patch, post};
use axum::Router;
use coffee_auth::authorize;

/// Combines all drink routes into a single router.
///
/// Each protected method carries its own guard; `GET /drinks` is public.
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/drinks",
            get(list::list_drinks).merge(post(create::create_drink).route_layer(
                from_fn_with_state(state.guard("post:drinks"), authorize),
            )),
        )
        .route(
            "/drinks-detail",
            get(list::list_drink_details).route_layer(from_fn_with_state(
                state.guard("get:drinks-detail"),
                authorize,
            )),
        )
        .route(
            "/drinks/{id}",
            patch(update::update_drink)
                .route_layer(from_fn_with_state(state.guard("patch:drinks"), authorize))
                .merge(routing::delete(delete::delete_drink).route_layer(from_fn_with_state(
                    state.guard("delete:drinks"),
                    authorize,
                ))),
        )
}
