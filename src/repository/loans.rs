//! Loans repository for database operations
//!
//! Every write runs in one transaction and keeps `stock + APPROVED loans`
//! constant for the affected book.

use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, Constraint},
    models::{
        book::Book,
        loan::{ensure_can_borrow, Loan, LoanResponse, LoanSearchQuery, LoanStatus},
        student::Student,
        web::PageRequest,
    },
};

use super::{books::book_not_found, students::student_not_found, Filters};

const LOAN_DETAILS: &str = r#"
    SELECT l.id, s.nim, s.full_name, b.title, l.status
    FROM loans l
    JOIN students s ON l.student_id = s.id
    JOIN books b ON l.book_id = b.id
"#;

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<LoanResponse> {
        let mut conn = self.pool.acquire().await?;
        fetch_details(&mut *conn, id).await
    }

    /// All loans, newest first
    pub async fn list(&self) -> AppResult<Vec<LoanResponse>> {
        let query = format!("{} ORDER BY l.created_at DESC, l.id", LOAN_DETAILS);
        let loans = sqlx::query_as::<_, LoanResponse>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    /// Search loans with pagination
    pub async fn search(
        &self,
        query: &LoanSearchQuery,
        page: PageRequest,
    ) -> AppResult<(Vec<LoanResponse>, i64)> {
        let mut filters = Filters::default();
        filters
            .contains("s.nim", query.nim.as_deref())
            .contains("s.full_name", query.full_name.as_deref())
            .equals("l.status", query.status.as_ref().map(LoanStatus::as_str));
        let where_clause = filters.where_clause();

        let count_query = format!(
            r#"
            SELECT COUNT(*)
            FROM loans l
            JOIN students s ON l.student_id = s.id
            {}
            "#,
            where_clause
        );
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filters.params() {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let Some(offset) = page.offset(total) else {
            return Ok((Vec::new(), total));
        };

        let select_query = format!(
            "{} {} ORDER BY l.created_at DESC, l.id LIMIT {} OFFSET {}",
            LOAN_DETAILS,
            where_clause,
            page.size,
            offset
        );
        let mut select_builder = sqlx::query_as::<_, LoanResponse>(&select_query);
        for param in filters.params() {
            select_builder = select_builder.bind(param);
        }
        let loans = select_builder.fetch_all(&self.pool).await?;

        Ok((loans, total))
    }

    /// Lend one copy of `book_id` to the student identified by `nim`
    pub async fn create(&self, nim: &str, book_id: Uuid) -> AppResult<LoanResponse> {
        let mut tx = self.pool.begin().await?;

        let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE nim = $1")
            .bind(nim)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(student_not_found)?;

        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(book_not_found)?;

        let pending = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE student_id = $1 AND status = $2)",
        )
        .bind(student.id)
        .bind(LoanStatus::Approved)
        .fetch_one(&mut *tx)
        .await?;

        ensure_can_borrow(book.stock, pending)?;

        adjust_stock(&mut *tx, book.id, -1).await?;

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO loans (id, student_id, book_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(student.id)
        .bind(book.id)
        .bind(LoanStatus::Approved)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::from(e).on_violation(Constraint::Unique, || {
                AppError::BusinessRule("Student has pending loans".to_string())
            })
        })?;

        tx.commit().await?;

        Ok(LoanResponse {
            id,
            nim: student.nim,
            full_name: student.full_name,
            title: book.title,
            status: LoanStatus::Approved,
        })
    }

    /// Move a loan to `status`, restoring stock on return
    pub async fn update_status(&self, id: Uuid, status: LoanStatus) -> AppResult<LoanResponse> {
        let mut tx = self.pool.begin().await?;

        let loan = lock_loan(&mut *tx, id).await?;
        let delta = loan.status.transition_to(status)?;

        if delta != 0 {
            adjust_stock(&mut *tx, loan.book_id, delta).await?;
        }

        if loan.status != status {
            sqlx::query("UPDATE loans SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(status)
                .execute(&mut *tx)
                .await?;
        }

        let updated = fetch_details(&mut *tx, id).await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Delete a loan; an APPROVED loan gives its copy back first
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let loan = lock_loan(&mut *tx, id).await?;
        let delta = loan.status.stock_delta_on_delete();

        if delta != 0 {
            adjust_stock(&mut *tx, loan.book_id, delta).await?;
        }

        sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

async fn lock_loan(conn: &mut PgConnection, id: Uuid) -> AppResult<Loan> {
    sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(loan_not_found)
}

async fn fetch_details(conn: &mut PgConnection, id: Uuid) -> AppResult<LoanResponse> {
    let query = format!("{} WHERE l.id = $1", LOAN_DETAILS);
    sqlx::query_as::<_, LoanResponse>(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(loan_not_found)
}

async fn adjust_stock(conn: &mut PgConnection, book_id: Uuid, delta: i32) -> AppResult<()> {
    sqlx::query("UPDATE books SET stock = stock + $2, updated_at = NOW() WHERE id = $1")
        .bind(book_id)
        .bind(delta)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            AppError::from(e).on_violation(Constraint::Check, || {
                AppError::BusinessRule("Book out of stock".to_string())
            })
        })?;
    Ok(())
}

fn loan_not_found() -> AppError {
    AppError::NotFound("Loan not found".to_string())
}
