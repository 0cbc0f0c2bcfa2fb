//! Students repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, Constraint},
    models::{
        student::{Student, StudentResponse, StudentSearchQuery},
        web::PageRequest,
    },
};

use super::Filters;

#[derive(Clone)]
pub struct StudentsRepository {
    pool: Pool<Postgres>,
}

impl StudentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get student by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Student> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(student_not_found)
    }

    /// All students ordered by name
    pub async fn list(&self) -> AppResult<Vec<StudentResponse>> {
        let students = sqlx::query_as::<_, StudentResponse>(
            "SELECT id, full_name, nim FROM students ORDER BY full_name, nim",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(students)
    }

    /// Count students
    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Search students with pagination
    pub async fn search(
        &self,
        query: &StudentSearchQuery,
        page: PageRequest,
    ) -> AppResult<(Vec<StudentResponse>, i64)> {
        let mut filters = Filters::default();
        filters
            .contains("full_name", query.full_name.as_deref())
            .contains("nim", query.nim.as_deref());
        let where_clause = filters.where_clause();

        let count_query = format!("SELECT COUNT(*) FROM students {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filters.params() {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let Some(offset) = page.offset(total) else {
            return Ok((Vec::new(), total));
        };

        let select_query = format!(
            r#"
            SELECT id, full_name, nim FROM students
            {}
            ORDER BY full_name, nim
            LIMIT {} OFFSET {}
            "#,
            where_clause,
            page.size,
            offset
        );
        let mut select_builder = sqlx::query_as::<_, StudentResponse>(&select_query);
        for param in filters.params() {
            select_builder = select_builder.bind(param);
        }
        let students = select_builder.fetch_all(&self.pool).await?;

        Ok((students, total))
    }

    /// Create a student; the nim must be unused
    pub async fn create(&self, full_name: &str, nim: &str) -> AppResult<Student> {
        sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (id, full_name, nim)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(full_name)
        .bind(nim)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from(e).on_violation(Constraint::Unique, || {
                AppError::Conflict("Student nim already exists".to_string())
            })
        })
    }
}

pub(crate) fn student_not_found() -> AppError {
    AppError::NotFound("Student not found".to_string())
}
