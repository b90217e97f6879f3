use coursehub_core::AppError;
use coursehub_models::{Course, CourseFilterParams, CreateCourseDto, UpdateCourseDto};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Course columns joined with the instructor. Callers append the `WHERE`.
const COURSE_SELECT: &str = "SELECT c.id, c.title, c.description, c.instructor_id,
        u.username AS instructor_username, u.email AS instructor_email,
        c.price::FLOAT8 AS price, c.duration_hours, c.level, c.created_at, c.updated_at
     FROM courses c
     INNER JOIN users u ON u.id = c.instructor_id";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_courses(
        db: &PgPool,
        filters: CourseFilterParams,
    ) -> Result<Vec<Course>, AppError> {
        let search = filters.search_term();
        let level = filters.level();

        debug!(filter.search = ?search, filter.level = ?level, "Fetching courses");

        let mut builder = QueryBuilder::<Postgres>::new(COURSE_SELECT);
        builder.push(" WHERE 1=1");

        if let Some(term) = search {
            builder
                .push(" AND c.title ILIKE ")
                .push_bind(format!("%{}%", term));
        }

        if let Some(level) = level {
            builder.push(" AND c.level = ").push_bind(level.as_str());
        }

        builder.push(" ORDER BY c.created_at DESC");

        let courses = builder
            .build_query_as::<Course>()
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching courses");
                AppError::from(e)
            })?;

        debug!(returned = courses.len(), "Courses fetched");
        Ok(courses)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_course(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!("{COURSE_SELECT} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| {
                warn!(course.id = %id, "Course not found");
                course_not_found()
            })
    }

    #[instrument(skip(db, dto), fields(course.title = %dto.title, db.operation = "INSERT", db.table = "courses"))]
    pub async fn create_course(
        db: &PgPool,
        instructor_id: Uuid,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO courses (title, description, instructor_id, price, duration_hours, level)
             VALUES ($1, $2, $3, CAST($4 AS NUMERIC(10, 2)), $5, $6)
             RETURNING id",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(instructor_id)
        .bind(dto.price.unwrap_or(0.0))
        .bind(dto.duration_hours.unwrap_or(0))
        .bind(dto.level.map(|level| level.as_str()))
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error creating course");
            AppError::from(e)
        })?;

        info!(course.id = %id, instructor.id = %instructor_id, "Course created successfully");
        Self::get_course(db, id).await
    }

    /// Writes only the fields present in `dto` and always bumps `updated_at`.
    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "courses"))]
    pub async fn update_course(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        Self::ensure_exists(db, id).await?;

        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!("No fields to update")));
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE courses SET updated_at = NOW()");

        if let Some(title) = dto.title {
            builder.push(", title = ").push_bind(title);
        }
        if let Some(description) = dto.description {
            builder.push(", description = ").push_bind(description);
        }
        if let Some(price) = dto.price {
            builder
                .push(", price = CAST(")
                .push_bind(price)
                .push(" AS NUMERIC(10, 2))");
        }
        if let Some(duration_hours) = dto.duration_hours {
            builder.push(", duration_hours = ").push_bind(duration_hours);
        }
        if let Some(level) = dto.level {
            builder.push(", level = ").push_bind(level.as_str());
        }

        builder.push(" WHERE id = ").push_bind(id);

        builder.build().execute(db).await.map_err(|e| {
            error!(error = %e, course.id = %id, "Database error updating course");
            AppError::from(e)
        })?;

        info!(course.id = %id, "Course updated successfully");
        Self::get_course(db, id).await
    }

    /// Enrollments and favourites of the course go with it.
    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "courses"))]
    pub async fn delete_course(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            warn!(course.id = %id, "Attempted to delete missing course");
            return Err(course_not_found());
        }

        info!(course.id = %id, "Course deleted");
        Ok(())
    }

    pub async fn ensure_exists(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(course_not_found());
        }
        Ok(())
    }
}

fn course_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Course not found"))
}
