use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{add_favourite, check_favourite, get_my_favourites, remove_favourite};
use crate::middleware::auth::require_auth;
use crate::middleware::role::require_student;
use crate::state::AppState;

pub fn init_favourites_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/my", get(get_my_favourites))
        .route("/{course_id}", post(add_favourite).delete(remove_favourite))
        .route("/{course_id}/check", get(check_favourite))
        .route_layer(middleware::from_fn(require_student))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
