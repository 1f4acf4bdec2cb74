//! PostgreSQL-backed admin repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::Admin;
use crate::domain::ports::{AdminRepository, AdminRepositoryError};

use super::models::{AdminRow, AdminWriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::admins;

/// Diesel-backed implementation of the admin repository port.
#[derive(Clone)]
pub struct DieselAdminRepository {
    pool: DbPool,
}

impl DieselAdminRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AdminRepositoryError {
    AdminRepositoryError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> AdminRepositoryError {
    debug!(error = %error, "admin query failed");
    AdminRepositoryError::query(error.to_string())
}

#[async_trait]
impl AdminRepository for DieselAdminRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AdminRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AdminRow> = admins::table
            .filter(admins::email.eq(email))
            .select(AdminRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn upsert(&self, admin: &Admin) -> Result<(), AdminRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(admins::table)
            .values(AdminWriteRow {
                id: &admin.id,
                email: &admin.email,
                password_hash: &admin.password_hash,
                created_at: admin.created_at,
            })
            .on_conflict(admins::email)
            .do_update()
            .set(admins::password_hash.eq(&admin.password_hash))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("refused"));
        assert!(matches!(err, AdminRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_errors_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, AdminRepositoryError::Query { .. }));
    }
}
