//! Repository layer for database operations

pub mod books;
pub mod loans;
pub mod students;
pub mod superadmins;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub superadmins: superadmins::SuperadminsRepository,
    pub students: students::StudentsRepository,
    pub books: books::BooksRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            superadmins: superadmins::SuperadminsRepository::new(pool.clone()),
            students: students::StudentsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Escape LIKE wildcards and wrap the value for substring matching
pub(crate) fn like_pattern(raw: &str) -> String {
    let escaped = raw
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// WHERE clause assembled from optional filters, bound positionally as text
#[derive(Debug, Default)]
pub(crate) struct Filters {
    conditions: Vec<String>,
    params: Vec<String>,
}

impl Filters {
    /// Case-insensitive substring match
    pub fn contains(&mut self, column: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.params.push(like_pattern(value));
            self.conditions
                .push(format!("{} ILIKE ${}", column, self.params.len()));
        }
        self
    }

    pub fn equals(&mut self, column: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.params.push(value.to_string());
            self.conditions.push(format!("{} = ${}", column, self.params.len()));
        }
        self
    }

    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ai"), "%ai%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\x"), "%c:\\\\x%");
    }

    #[test]
    fn test_filters_number_placeholders_in_order() {
        let mut filters = Filters::default();
        filters
            .contains("s.nim", Some("2054"))
            .contains("s.full_name", None)
            .equals("l.status", Some("APPROVED"));

        assert_eq!(
            filters.where_clause(),
            "WHERE s.nim ILIKE $1 AND l.status = $2"
        );
        assert_eq!(filters.params(), &["%2054%".to_string(), "APPROVED".to_string()]);
    }

    #[test]
    fn test_empty_filters() {
        let filters = Filters::default();
        assert_eq!(filters.where_clause(), "");
        assert!(filters.params().is_empty());
    }
}
