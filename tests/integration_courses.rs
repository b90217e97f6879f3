mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_course, create_test_course_with_level, create_test_user,
    empty_request, json_request, setup_test_app,
};
use coursehub_auth::UserRole;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_is_public(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    create_test_course(&pool, admin.id, "Intro to Rust").await;
    create_test_course(&pool, admin.id, "Advanced SQL").await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/courses", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);

    let first = &body["data"][0];
    assert_eq!(first["instructor_id"], admin.id.to_string());
    assert_eq!(first["instructor_username"], admin.username);
    assert_eq!(first["instructor_email"], admin.email);
    assert_eq!(first["price"], 19.99);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_newest_first(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let older = create_test_course(&pool, admin.id, "Older").await;
    let newer = create_test_course(&pool, admin.id, "Newer").await;

    sqlx::query("UPDATE courses SET created_at = NOW() - INTERVAL '1 day' WHERE id = $1")
        .bind(older.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool);
    let body = body_json(
        app.oneshot(empty_request("GET", "/api/courses", None))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(body["data"][0]["id"], newer.id.to_string());
    assert_eq!(body["data"][1]["id"], older.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_search_and_level(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    create_test_course_with_level(&pool, admin.id, "Rust for Beginners", Some("beginner")).await;
    create_test_course_with_level(&pool, admin.id, "Advanced Rust", Some("advanced")).await;
    create_test_course_with_level(&pool, admin.id, "Cooking", Some("beginner")).await;
    let app = setup_test_app(pool);

    let body = body_json(
        app.clone()
            .oneshot(empty_request("GET", "/api/courses?search=rUsT", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["count"], 2);

    let body = body_json(
        app.clone()
            .oneshot(empty_request(
                "GET",
                "/api/courses?search=rust&level=beginner",
                None,
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["title"], "Rust for Beginners");

    // Unknown levels are ignored rather than rejected
    let body = body_json(
        app.oneshot(empty_request("GET", "/api/courses?level=expert", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["count"], 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_course(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let course = create_test_course(&pool, admin.id, "Intro to Rust").await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", &format!("/api/courses/{}", course.id), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["title"], course.title);
    assert_eq!(body["data"]["duration_hours"], 10);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_course_not_found(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", &format!("/api/courses/{}", Uuid::new_v4()), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Course not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_course_invalid_id(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/courses/not-a-uuid", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/courses",
            Some(&admin.token),
            json!({
                "title": "  Systems Programming  ",
                "description": "Low-level fun",
                "price": 49.5,
                "duration_hours": 20,
                "level": "intermediate"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Course created successfully");
    assert_eq!(body["data"]["title"], "Systems Programming");
    assert_eq!(body["data"]["instructor_id"], admin.id.to_string());
    assert_eq!(body["data"]["price"], 49.5);
    assert_eq!(body["data"]["level"], "intermediate");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_defaults(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/courses",
            Some(&admin.token),
            json!({ "title": "Free course" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["price"], 0.0);
    assert_eq!(body["data"]["duration_hours"], 0);
    assert!(body["data"]["level"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_validation(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/courses",
            Some(&admin.token),
            json!({ "title": "   ", "price": -3 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/courses",
            Some(&admin.token),
            json!({ "title": "Rust", "level": "expert" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_course_partial(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let course = create_test_course(&pool, admin.id, "Original title").await;

    let before: chrono::DateTime<chrono::Utc> =
        sqlx::query_scalar("SELECT updated_at FROM courses WHERE id = $1")
            .bind(course.id)
            .fetch_one(&pool)
            .await
            .unwrap();

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/courses/{}", course.id),
            Some(&admin.token),
            json!({ "price": 5, "level": "advanced" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Course updated successfully");
    assert_eq!(body["data"]["title"], "Original title");
    assert_eq!(body["data"]["description"], "A test course");
    assert_eq!(body["data"]["price"], 5.0);
    assert_eq!(body["data"]["level"], "advanced");

    let after: chrono::DateTime<chrono::Utc> =
        sqlx::query_scalar("SELECT updated_at FROM courses WHERE id = $1")
            .bind(course.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(after >= before);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_course_no_fields(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let course = create_test_course(&pool, admin.id, "Rust").await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/courses/{}", course.id),
            Some(&admin.token),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "No fields to update");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_course(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/courses/{}", Uuid::new_v4()),
            Some(&admin.token),
            json!({ "title": "New" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_course_cascades(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, admin.id, "Doomed").await;

    sqlx::query("INSERT INTO enrollments (student_id, course_id) VALUES ($1, $2)")
        .bind(student.id)
        .bind(course.id)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO favourites (student_id, course_id) VALUES ($1, $2)")
        .bind(student.id)
        .bind(course.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool.clone());
    let response = app
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/courses/{}", course.id),
            Some(&admin.token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Course deleted successfully");

    let remaining: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM enrollments) + (SELECT COUNT(*) FROM favourites)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(remaining, 0);

    let response = app
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/courses/{}", course.id),
            Some(&admin.token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
