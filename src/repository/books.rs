//! Books repository for database operations

use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, Constraint},
    models::{
        book::{Book, BookSearchQuery, CreateBook, UpdateBook},
        web::PageRequest,
    },
};

use super::Filters;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(book_not_found)
    }

    /// All books ordered by title
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Search books with pagination
    pub async fn search(
        &self,
        query: &BookSearchQuery,
        page: PageRequest,
    ) -> AppResult<(Vec<Book>, i64)> {
        let mut filters = Filters::default();
        filters
            .contains("id::text", query.id.as_deref())
            .contains("title", query.title.as_deref());
        let where_clause = filters.where_clause();

        let count_query = format!("SELECT COUNT(*) FROM books {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filters.params() {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let Some(offset) = page.offset(total) else {
            return Ok((Vec::new(), total));
        };

        let select_query = format!(
            "SELECT * FROM books {} ORDER BY title LIMIT {} OFFSET {}",
            where_clause,
            page.size,
            offset
        );
        let mut select_builder = sqlx::query_as::<_, Book>(&select_query);
        for param in filters.params() {
            select_builder = select_builder.bind(param);
        }
        let books = select_builder.fetch_all(&self.pool).await?;

        Ok((books, total))
    }

    /// Create a book with a unique title
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        if title_taken_by_other(&mut *tx, &book.title, None).await? {
            return Err(title_taken());
        }

        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, stock)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&book.title)
        .bind(book.stock)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await?;

        Ok(created)
    }

    /// Apply the fields present in `update`, leaving the rest unchanged
    pub async fn update(&self, id: Uuid, update: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, Uuid>("SELECT id FROM books WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(book_not_found)?;

        if let Some(ref title) = update.title {
            if title_taken_by_other(&mut *tx, title, Some(id)).await? {
                return Err(title_taken());
            }
        }

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                stock = COALESCE($3, stock),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.stock)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_write_error)?
        .ok_or_else(book_not_found)?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Delete a book that has never been lent out
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query_scalar::<_, Uuid>("SELECT id FROM books WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(book_not_found)?;

        let loans = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM loans WHERE book_id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if loans > 0 {
            return Err(has_loans());
        }

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from(e).on_violation(Constraint::ForeignKey, has_loans))?;

        tx.commit().await?;

        Ok(())
    }
}

async fn title_taken_by_other(
    conn: &mut PgConnection,
    title: &str,
    except: Option<Uuid>,
) -> AppResult<bool> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM books WHERE title = $1 AND ($2::uuid IS NULL OR id <> $2))",
    )
    .bind(title)
    .bind(except)
    .fetch_one(&mut *conn)
    .await?;
    Ok(taken)
}

fn map_write_error(e: sqlx::Error) -> AppError {
    AppError::from(e)
        .on_violation(Constraint::Unique, title_taken)
        .on_violation(Constraint::Check, || {
            AppError::invalid_field("stock", "Stock must not be negative")
        })
}

pub(crate) fn book_not_found() -> AppError {
    AppError::NotFound("Book not found".to_string())
}

fn title_taken() -> AppError {
    AppError::Conflict("Book title already exists".to_string())
}

fn has_loans() -> AppError {
    AppError::BusinessRule("Book has active loans".to_string())
}
