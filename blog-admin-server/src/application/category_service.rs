use tracing::info;

use crate::data::category_repository::CategoryRepository;
use crate::domain::category::{Category, CategoryRequest};
use crate::domain::error::DomainError;

pub(crate) struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_category(
        &self,
        req: CategoryRequest,
    ) -> Result<Category, DomainError> {
        let req = req.validate()?;
        let category = self.repo.create_category(req.name).await?;

        info!(category_id = category.id, "category created");
        Ok(category)
    }

    pub(crate) async fn get_category(&self, id: i64) -> Result<Category, DomainError> {
        validate_category_path_id(id)?;
        self.repo
            .get_category(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("category id: {id}")))
    }

    pub(crate) async fn update_category(
        &self,
        id: i64,
        req: CategoryRequest,
    ) -> Result<Category, DomainError> {
        validate_category_path_id(id)?;
        let req = req.validate()?;
        let category = self
            .repo
            .update_category(id, req.name)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("category id: {id}")))?;

        info!(category_id = id, "category updated");
        Ok(category)
    }

    /// Removing a category also unlinks it from every post.
    pub(crate) async fn delete_category(&self, id: i64) -> Result<(), DomainError> {
        validate_category_path_id(id)?;
        if !self.repo.delete_category(id).await? {
            return Err(DomainError::NotFound(format!("category id: {id}")));
        }

        info!(category_id = id, "category deleted");
        Ok(())
    }

    pub(crate) async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.repo.list_categories().await
    }
}

fn validate_category_path_id(id: i64) -> Result<(), DomainError> {
    if id <= 0 {
        return Err(DomainError::Validation {
            field: "id",
            message: "must be > 0",
        });
    }
    Ok(())
}
