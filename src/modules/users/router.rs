use axum::{
    Router, middleware,
    routing::{delete, get},
};

use super::controller::{delete_user, get_users};
use crate::middleware::auth::require_auth;
use crate::middleware::role::require_admin;
use crate::state::AppState;

pub fn init_users_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/{id}", delete(delete_user))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
