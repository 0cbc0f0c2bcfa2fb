//! Student model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Student row
#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub full_name: String,
    pub nim: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentResponse {
    pub id: Uuid,
    pub full_name: String,
    /// Student number
    pub nim: String,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            full_name: student.full_name,
            nim: student.nim,
        }
    }
}

/// Seed-only: students have no create endpoint
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudent {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(length(min = 1, max = 20))]
    pub nim: String,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentSearchQuery {
    /// Substring of the student's name
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    /// Substring of the student number
    #[validate(length(min = 1))]
    pub nim: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub size: Option<i64>,
}
