//! PostgreSQL User Directory Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{instrument, warn};

use core_kernel::{DomainPort, PortError, UserId};
use domain_claims::{ApplicationUser, Role, UserDirectory};

use crate::repositories::users::{UserRow, UsersRepository};

/// Resolves users from the `application_users` table
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    repository: UsersRepository,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UsersRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresUserDirectory {}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    #[instrument(skip(self))]
    async fn find_user(&self, id: &UserId) -> Result<Option<ApplicationUser>, PortError> {
        self.repository
            .find_by_id(id.as_str())
            .await?
            .map(row_to_user)
            .transpose()
    }
}

fn row_to_user(row: UserRow) -> Result<ApplicationUser, PortError> {
    let role: Role = row.role.parse().map_err(|e| {
        warn!(user_id = %row.user_id, role = %row.role, "Stored user has an unknown role");
        PortError::transformation(format!("user {}: {}", row.user_id, e))
    })?;

    Ok(ApplicationUser {
        id: UserId::new(row.user_id),
        first_name: row.first_name,
        last_name: row.last_name,
        role,
    })
}
