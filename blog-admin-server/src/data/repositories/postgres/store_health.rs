use async_trait::async_trait;
use sqlx::PgPool;

use crate::data::store_health::StoreHealth;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresStoreHealth {
    pool: PgPool,
}

impl PostgresStoreHealth {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for PostgresStoreHealth {
    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|err| DomainError::Store(err.to_string()))?;
        Ok(())
    }
}
