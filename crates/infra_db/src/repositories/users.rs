//! Users repository implementation
//!
//! Read access to the `application_users` table mirrored from the identity
//! provider.

use sqlx::PgPool;

use crate::error::DatabaseError;

/// Repository for application user lookups
#[derive(Debug, Clone)]
pub struct UsersRepository {
    pool: PgPool,
}

impl UsersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a user by identifier, if known
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRow>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, first_name, last_name, role FROM application_users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

/// Database row for an application user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}
