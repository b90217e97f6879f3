use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Favourite {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FavouriteWithCourse {
    pub favourite_id: Uuid,
    pub favourited_at: DateTime<Utc>,
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

/// Body of `GET /api/favourites/{course_id}/check`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FavouriteCheckResponse {
    pub success: bool,
    #[serde(rename = "isFavourite")]
    pub is_favourite: bool,
}

impl FavouriteCheckResponse {
    pub fn new(is_favourite: bool) -> Self {
        Self {
            success: true,
            is_favourite,
        }
    }
}
