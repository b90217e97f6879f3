use coursehub_auth::UserRole;
use coursehub_core::{ErrorBody, MessageResponse};
use coursehub_models::{
    AuthPayload, Course, CourseLevel, CreateCourseDto, Enrollment, EnrollmentWithCourse,
    Favourite, FavouriteCheckResponse, FavouriteWithCourse, LoginRequest, RegisterRequest,
    UpdateCourseDto, UpdateProgressDto, User,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::middleware::auth::AuthUser;
use crate::modules::health::controller::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CourseHub API",
        description = "Course catalogue, enrollments and favourites with JWT authentication"
    ),
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_me,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::enrollments::controller::enroll_in_course,
        crate::modules::enrollments::controller::get_my_enrollments,
        crate::modules::enrollments::controller::update_progress,
        crate::modules::favourites::controller::add_favourite,
        crate::modules::favourites::controller::remove_favourite,
        crate::modules::favourites::controller::get_my_favourites,
        crate::modules::favourites::controller::check_favourite,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::delete_user,
    ),
    components(
        schemas(
            UserRole,
            User,
            AuthUser,
            RegisterRequest,
            LoginRequest,
            AuthPayload,
            Course,
            CourseLevel,
            CreateCourseDto,
            UpdateCourseDto,
            Enrollment,
            EnrollmentWithCourse,
            UpdateProgressDto,
            Favourite,
            FavouriteWithCourse,
            FavouriteCheckResponse,
            MessageResponse,
            ErrorBody,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Registration, login and the current user"),
        (name = "Courses", description = "Course catalogue; writes require the admin role"),
        (name = "Enrollments", description = "Student enrollments and progress"),
        (name = "Favourites", description = "Student favourite courses"),
        (name = "Users", description = "User administration (admin only)"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/api/health",
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/me",
            "/api/courses",
            "/api/courses/{id}",
            "/api/enrollments/my",
            "/api/enrollments/{id}",
            "/api/enrollments/{id}/progress",
            "/api/favourites/my",
            "/api/favourites/{course_id}",
            "/api/favourites/{course_id}/check",
            "/api/users",
            "/api/users/{id}",
        ] {
            assert!(paths.contains(&path), "{path} missing from OpenAPI document");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
