//! Superadmins repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, Constraint},
    models::superadmin::{Role, Superadmin},
};

#[derive(Clone)]
pub struct SuperadminsRepository {
    pool: Pool<Postgres>,
}

impl SuperadminsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get superadmin by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Superadmin>> {
        let admin = sqlx::query_as::<_, Superadmin>("SELECT * FROM superadmins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    /// Get superadmin by username
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<Superadmin>> {
        let admin =
            sqlx::query_as::<_, Superadmin>("SELECT * FROM superadmins WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;
        Ok(admin)
    }

    /// Count superadmins
    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM superadmins")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert a superadmin; `password_hash` must already be hashed
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        full_name: &str,
        role: Role,
    ) -> AppResult<Superadmin> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM superadmins WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&mut *tx)
        .await?;

        if exists {
            return Err(username_taken());
        }

        let admin = sqlx::query_as::<_, Superadmin>(
            r#"
            INSERT INTO superadmins (id, username, password, full_name, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .bind(full_name)
        .bind(role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from(e).on_violation(Constraint::Unique, username_taken))?;

        tx.commit().await?;

        Ok(admin)
    }
}

fn username_taken() -> AppError {
    AppError::Conflict("Username already exists".to_string())
}
