mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_course, create_test_user, empty_request, setup_test_app};
use coursehub_auth::UserRole;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_favourite_lifecycle(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, admin.id, "Intro to Rust").await;
    let app = setup_test_app(pool);
    let check_uri = format!("/api/favourites/{}/check", course.id);
    let favourite_uri = format!("/api/favourites/{}", course.id);

    let body = body_json(
        app.clone()
            .oneshot(empty_request("GET", &check_uri, Some(&student.token)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body, serde_json::json!({ "success": true, "isFavourite": false }));

    let response = app
        .clone()
        .oneshot(empty_request("POST", &favourite_uri, Some(&student.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Course added to favourites");
    assert_eq!(body["data"]["course_id"], course.id.to_string());

    let body = body_json(
        app.clone()
            .oneshot(empty_request("GET", &check_uri, Some(&student.token)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["isFavourite"], true);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &favourite_uri, Some(&student.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Course removed from favourites");

    let response = app
        .oneshot(empty_request("DELETE", &favourite_uri, Some(&student.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Course is not in your favourites");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_favourite_twice(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, admin.id, "Intro to Rust").await;
    let app = setup_test_app(pool);
    let uri = format!("/api/favourites/{}", course.id);

    app.clone()
        .oneshot(empty_request("POST", &uri, Some(&student.token)))
        .await
        .unwrap();
    let response = app
        .oneshot(empty_request("POST", &uri, Some(&student.token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Course is already in your favourites");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_favourite_missing_course(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(empty_request(
            "POST",
            &format!("/api/favourites/{}", Uuid::new_v4()),
            Some(&student.token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_my_favourites(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let other = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, admin.id, "Intro to Rust").await;
    let ignored = create_test_course(&pool, admin.id, "Not mine").await;

    for (student_id, course_id) in [(student.id, course.id), (other.id, ignored.id)] {
        sqlx::query("INSERT INTO favourites (student_id, course_id) VALUES ($1, $2)")
            .bind(student_id)
            .bind(course_id)
            .execute(&pool)
            .await
            .unwrap();
    }

    let app = setup_test_app(pool);
    let response = app
        .oneshot(empty_request("GET", "/api/favourites/my", Some(&student.token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["course_id"], course.id.to_string());
    assert_eq!(body["data"][0]["title"], "Intro to Rust");
    assert_eq!(body["data"][0]["instructor_email"], admin.email);
}
