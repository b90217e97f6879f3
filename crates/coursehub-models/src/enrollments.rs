use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    pub progress_percentage: i32,
    pub completed: bool,
}

/// An enrollment with the enrolled course's details, as listed to the student.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EnrollmentWithCourse {
    pub enrollment_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    pub progress_percentage: i32,
    pub completed: bool,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_hours: i32,
    pub level: Option<String>,
    pub course_created_at: DateTime<Utc>,
    pub instructor_id: Uuid,
    pub instructor_username: String,
    pub instructor_email: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProgressDto {
    #[serde(default)]
    #[validate(range(
        min = 0,
        max = 100,
        message = "Progress percentage must be between 0 and 100"
    ))]
    #[schema(example = 50)]
    pub progress_percentage: Option<i32>,

    #[serde(default)]
    pub completed: Option<bool>,
}

impl UpdateProgressDto {
    pub fn is_empty(&self) -> bool {
        self.progress_percentage.is_none() && self.completed.is_none()
    }
}
