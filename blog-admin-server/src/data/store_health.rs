use async_trait::async_trait;

use crate::domain::error::DomainError;

/// Round-trip to the store, used by `/healthz`.
#[async_trait]
pub(crate) trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), DomainError>;
}
