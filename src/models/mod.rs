//! Data models for the campus library

pub mod ability;
pub mod book;
pub mod loan;
pub mod student;
pub mod superadmin;
pub mod web;

use uuid::Uuid;

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use ability::{Ability, Action, Subject};
pub use book::{Book, BookResponse};
pub use loan::{Loan, LoanResponse, LoanStatus};
pub use student::{Student, StudentResponse};
pub use superadmin::{Principal, Role, Superadmin};
pub use web::{Page, PageRequest, Paging, WebResponse};

/// Parse a UUID supplied by a client, reporting failures against `field`
pub fn parse_uuid(field: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::invalid_field(field, "Invalid uuid"))
}
