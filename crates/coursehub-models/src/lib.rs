//! # CourseHub Models
//!
//! Domain models and DTOs for the CourseHub API.
//!
//! - [`auth`]: registration and login payloads
//! - [`users`]: user rows as returned to clients
//! - [`courses`]: courses, levels, create/update DTOs and list filters
//! - [`enrollments`]: enrollments and progress updates
//! - [`favourites`]: favourited courses
//!
//! Row types derive `sqlx::FromRow` and map one-to-one onto the queries in
//! the application services. Request DTOs derive `validator::Validate` and are
//! consumed through the `ValidatedJson` extractor.

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod favourites;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthPayload, LoginRequest, RegisterRequest};
pub use courses::{Course, CourseFilterParams, CourseLevel, CreateCourseDto, UpdateCourseDto};
pub use enrollments::{Enrollment, EnrollmentWithCourse, UpdateProgressDto};
pub use favourites::{Favourite, FavouriteCheckResponse, FavouriteWithCourse};
pub use users::User;

pub use coursehub_auth::UserRole;
