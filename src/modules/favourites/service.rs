use coursehub_core::AppError;
use coursehub_models::{Favourite, FavouriteWithCourse};
use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::modules::courses::service::CourseService;

pub struct FavouriteService;

impl FavouriteService {
    #[instrument(skip(db), fields(db.operation = "INSERT", db.table = "favourites"))]
    pub async fn add_favourite(
        db: &PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Favourite, AppError> {
        CourseService::ensure_exists(db, course_id).await?;

        let favourite = sqlx::query_as::<_, Favourite>(
            "INSERT INTO favourites (student_id, course_id) VALUES ($1, $2)
             RETURNING id, student_id, course_id, created_at",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(student.id = %student_id, course.id = %course_id, "Duplicate favourite");
                return AppError::bad_request(anyhow::anyhow!(
                    "Course is already in your favourites"
                ));
            }
            error!(error = %e, "Database error adding favourite");
            AppError::from(e)
        })?;

        info!(favourite.id = %favourite.id, course.id = %course_id, "Course added to favourites");
        Ok(favourite)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "favourites"))]
    pub async fn remove_favourite(
        db: &PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM favourites WHERE student_id = $1 AND course_id = $2")
            .bind(student_id)
            .bind(course_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Course is not in your favourites"
            )));
        }

        info!(course.id = %course_id, "Course removed from favourites");
        Ok(())
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "favourites"))]
    pub async fn get_my_favourites(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<FavouriteWithCourse>, AppError> {
        let favourites = sqlx::query_as::<_, FavouriteWithCourse>(
            "SELECT f.id AS favourite_id, f.created_at AS favourited_at,
                    c.id AS course_id, c.title, c.description, c.price::FLOAT8 AS price,
                    c.duration_hours, c.level, c.created_at AS course_created_at,
                    u.id AS instructor_id, u.username AS instructor_username,
                    u.email AS instructor_email
             FROM favourites f
             INNER JOIN courses c ON c.id = f.course_id
             INNER JOIN users u ON u.id = c.instructor_id
             WHERE f.student_id = $1
             ORDER BY f.created_at DESC",
        )
        .bind(student_id)
        .fetch_all(db)
        .await?;

        debug!(returned = favourites.len(), "Favourites fetched");
        Ok(favourites)
    }

    pub async fn is_favourite(
        db: &PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM favourites WHERE student_id = $1 AND course_id = $2)",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(db)
        .await?;

        Ok(exists)
    }
}
