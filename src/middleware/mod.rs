//! Request gates.
//!
//! - [`auth`]: token verification and the [`AuthUser`](auth::AuthUser) extractor
//! - [`role`]: exact-match role checks
//!
//! Protected routes stack both gates with `route_layer`. The layer added last
//! runs first, so the auth gate is added after the role gate:
//!
//! ```ignore
//! Router::new()
//!     .route("/my", get(get_my_enrollments))
//!     .route_layer(middleware::from_fn(require_student))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

pub mod auth;
pub mod role;
