use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::controller::{create_course, delete_course, get_course, get_courses, update_course};
use crate::middleware::auth::require_auth;
use crate::middleware::role::require_admin;
use crate::state::AppState;

pub fn init_courses_router(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_course))
        .route("/{id}", put(update_course).delete(delete_course))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/", get(get_courses))
        .route("/{id}", get(get_course))
        .merge(admin)
}
