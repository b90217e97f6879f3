use coursehub_core::AppError;
use coursehub_models::{Enrollment, EnrollmentWithCourse, UpdateProgressDto};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::modules::courses::service::CourseService;
use crate::validator::validate_dto;

const ENROLLMENT_COLUMNS: &str =
    "id, student_id, course_id, enrolled_at, progress_percentage, completed";

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(db), fields(db.operation = "INSERT", db.table = "enrollments"))]
    pub async fn enroll(
        db: &PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Enrollment, AppError> {
        CourseService::ensure_exists(db, course_id).await?;

        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "INSERT INTO enrollments (student_id, course_id) VALUES ($1, $2)
             RETURNING {ENROLLMENT_COLUMNS}"
        ))
        .bind(student_id)
        .bind(course_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(student.id = %student_id, course.id = %course_id, "Duplicate enrollment");
                return AppError::bad_request(anyhow::anyhow!(
                    "You are already enrolled in this course"
                ));
            }
            error!(error = %e, "Database error creating enrollment");
            AppError::from(e)
        })?;

        info!(
            enrollment.id = %enrollment.id,
            student.id = %student_id,
            course.id = %course_id,
            "Student enrolled"
        );
        Ok(enrollment)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "enrollments"))]
    pub async fn get_my_enrollments(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<EnrollmentWithCourse>, AppError> {
        let enrollments = sqlx::query_as::<_, EnrollmentWithCourse>(
            "SELECT e.id AS enrollment_id, e.enrolled_at, e.progress_percentage, e.completed,
                    c.id AS course_id, c.title, c.description, c.price::FLOAT8 AS price,
                    c.duration_hours, c.level, c.created_at AS course_created_at,
                    u.id AS instructor_id, u.username AS instructor_username,
                    u.email AS instructor_email
             FROM enrollments e
             INNER JOIN courses c ON c.id = e.course_id
             INNER JOIN users u ON u.id = c.instructor_id
             WHERE e.student_id = $1
             ORDER BY e.enrolled_at DESC",
        )
        .bind(student_id)
        .fetch_all(db)
        .await?;

        debug!(returned = enrollments.len(), "Enrollments fetched");
        Ok(enrollments)
    }

    /// Updates progress on one of the caller's own enrollments. `completed`
    /// is stored as given, independent of the percentage.
    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "enrollments"))]
    pub async fn update_progress(
        db: &PgPool,
        student_id: Uuid,
        enrollment_id: Uuid,
        dto: UpdateProgressDto,
    ) -> Result<Enrollment, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE id = $1 AND student_id = $2)",
        )
        .bind(enrollment_id)
        .bind(student_id)
        .fetch_one(db)
        .await?;

        if !owned {
            warn!(enrollment.id = %enrollment_id, student.id = %student_id, "Enrollment not found for student");
            return Err(AppError::not_found(anyhow::anyhow!("Enrollment not found")));
        }

        validate_dto(&dto)?;

        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!("No fields to update")));
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE enrollments SET ");
        let mut fields = builder.separated(", ");
        if let Some(progress) = dto.progress_percentage {
            fields.push("progress_percentage = ").push_bind_unseparated(progress);
        }
        if let Some(completed) = dto.completed {
            fields.push("completed = ").push_bind_unseparated(completed);
        }

        builder
            .push(" WHERE id = ")
            .push_bind(enrollment_id)
            .push(" AND student_id = ")
            .push_bind(student_id)
            .push(" RETURNING ")
            .push(ENROLLMENT_COLUMNS);

        let enrollment = builder
            .build_query_as::<Enrollment>()
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, enrollment.id = %enrollment_id, "Database error updating enrollment");
                AppError::from(e)
            })?;

        info!(
            enrollment.id = %enrollment.id,
            progress = enrollment.progress_percentage,
            completed = enrollment.completed,
            "Enrollment progress updated"
        );
        Ok(enrollment)
    }
}
