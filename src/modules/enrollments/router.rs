use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::controller::{enroll_in_course, get_my_enrollments, update_progress};
use crate::middleware::auth::require_auth;
use crate::middleware::role::require_student;
use crate::state::AppState;

pub fn init_enrollments_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/my", get(get_my_enrollments))
        .route("/{id}", post(enroll_in_course))
        .route("/{id}/progress", put(update_progress))
        .route_layer(middleware::from_fn(require_student))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
