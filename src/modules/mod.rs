pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod favourites;
pub mod health;
pub mod users;
