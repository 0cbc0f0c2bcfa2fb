//! Loan model, status state machine and stock arithmetic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Loan status. RETURNED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanStatus {
    Approved,
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Approved => "APPROVED",
            LoanStatus::Returned => "RETURNED",
        }
    }

    /// Validate a status change and return the stock delta it implies for the book
    pub fn transition_to(self, next: LoanStatus) -> AppResult<i32> {
        match (self, next) {
            (LoanStatus::Approved, LoanStatus::Returned) => Ok(1),
            (LoanStatus::Approved, LoanStatus::Approved) => Ok(0),
            (LoanStatus::Returned, _) => Err(AppError::BusinessRule(
                "Invalid status transition".to_string(),
            )),
        }
    }

    /// Stock delta applied when a loan in this status is deleted
    pub fn stock_delta_on_delete(self) -> i32 {
        match self {
            LoanStatus::Approved => 1,
            LoanStatus::Returned => 0,
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVED" => Ok(LoanStatus::Approved),
            "RETURNED" => Ok(LoanStatus::Returned),
            _ => Err(format!("Invalid loan status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Preconditions for lending a book to a student
pub fn ensure_can_borrow(stock: i32, has_pending_loan: bool) -> AppResult<()> {
    if stock <= 0 {
        return Err(AppError::BusinessRule("Book out of stock".to_string()));
    }
    if has_pending_loan {
        return Err(AppError::BusinessRule(
            "Student has pending loans".to_string(),
        ));
    }
    Ok(())
}

/// Loan row
#[derive(Debug, Clone, FromRow)]
pub struct Loan {
    pub id: Uuid,
    pub student_id: Uuid,
    pub book_id: Uuid,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Loan joined with its student and book
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanResponse {
    pub id: Uuid,
    pub nim: String,
    pub full_name: String,
    pub title: String,
    pub status: LoanStatus,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLoan {
    #[validate(length(min = 1, max = 20))]
    pub nim: String,
    #[serde(rename = "bookId")]
    #[validate(length(min = 1))]
    pub book_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLoan {
    pub status: LoanStatus,
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoanSearchQuery {
    /// Substring of the borrower's student number
    #[validate(length(min = 1))]
    pub nim: Option<String>,
    /// Substring of the borrower's name
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    /// Exact status
    pub status: Option<LoanStatus>,
    #[validate(range(min = 1))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub size: Option<i64>,
}
