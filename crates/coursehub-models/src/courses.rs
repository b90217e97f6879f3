//! Courses and the filters used to list them.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use coursehub_core::serde::{deserialize_optional_trimmed, deserialize_trimmed};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            _ => Err(()),
        }
    }
}

/// A course joined with its instructor.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: Uuid,
    pub instructor_username: String,
    pub instructor_email: String,
    pub price: f64,
    pub duration_hours: i32,
    #[schema(example = "beginner")]
    pub level: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title is required and must be at most 200 characters"
    ))]
    #[schema(example = "Intro to Rust")]
    pub title: String,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_price"))]
    #[schema(example = 49.99)]
    pub price: Option<f64>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Duration must be a positive number"))]
    pub duration_hours: Option<i32>,

    #[serde(default)]
    pub level: Option<CourseLevel>,
}

/// Partial update. A field that is absent or `null` is left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_price"))]
    pub price: Option<f64>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Duration must be a positive number"))]
    pub duration_hours: Option<i32>,

    #[serde(default)]
    pub level: Option<CourseLevel>,
}

impl UpdateCourseDto {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.duration_hours.is_none()
            && self.level.is_none()
    }
}

/// Query string of `GET /api/courses`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CourseFilterParams {
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    /// Ignored unless it names a known level.
    pub level: Option<String>,
}

impl CourseFilterParams {
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn level(&self) -> Option<CourseLevel> {
        self.level.as_deref().and_then(|l| l.parse().ok())
    }
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price >= 0.0 {
        return Ok(());
    }

    Err(ValidationError::new("price")
        .with_message(Cow::Borrowed("Price must be a positive number")))
}
