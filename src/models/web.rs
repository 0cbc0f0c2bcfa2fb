//! Response envelope and pagination shared by every endpoint

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_SIZE: i64 = 10;

/// Paging metadata returned by search endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Paging {
    pub current_page: i64,
    pub size: i64,
    pub total_page: i64,
}

impl Paging {
    pub fn new(current_page: i64, size: i64, total: i64) -> Self {
        let total_page = if size > 0 { (total + size - 1) / size } else { 0 };
        Self {
            current_page,
            size,
            total_page,
        }
    }
}

/// Resolved page window for a search query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE),
            size: size.unwrap_or(DEFAULT_SIZE),
        }
    }

    /// Rows to skip, or `None` when the window lies beyond `total`
    pub fn offset(&self, total: i64) -> Option<i64> {
        (self.page - 1)
            .checked_mul(self.size)
            .filter(|offset| *offset < total)
    }

    pub fn paging(&self, total: i64) -> Paging {
        Paging::new(self.page, self.size, total)
    }
}

/// One page of results plus its paging metadata
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub paging: Paging,
}

/// Uniform response wrapper: `{ data?, errors?, paging?, message? }`
#[derive(Debug, Serialize)]
pub struct WebResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> WebResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: None,
            paging: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> WebResponse<Vec<T>> {
    pub fn page(page: Page<T>) -> Self {
        Self {
            data: Some(page.data),
            errors: None,
            paging: Some(page.paging),
            message: None,
        }
    }
}

impl WebResponse<()> {
    pub fn errors(errors: serde_json::Value) -> Self {
        Self {
            data: None,
            errors: Some(errors),
            paging: None,
            message: None,
        }
    }
}
