use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::category::Category;
use crate::domain::error::DomainError;

#[async_trait]
pub(crate) trait CategoryRepository: Send + Sync {
    async fn create_category(&self, name: String) -> Result<Category, DomainError>;
    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError>;
    async fn update_category(&self, id: i64, name: String)
    -> Result<Option<Category>, DomainError>;
    async fn delete_category(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
}

#[async_trait]
impl<T: CategoryRepository + ?Sized> CategoryRepository for Arc<T> {
    async fn create_category(&self, name: String) -> Result<Category, DomainError> {
        (**self).create_category(name).await
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError> {
        (**self).get_category(id).await
    }

    async fn update_category(
        &self,
        id: i64,
        name: String,
    ) -> Result<Option<Category>, DomainError> {
        (**self).update_category(id, name).await
    }

    async fn delete_category(&self, id: i64) -> Result<bool, DomainError> {
        (**self).delete_category(id).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        (**self).list_categories().await
    }
}
