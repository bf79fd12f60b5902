use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::category::CategorySet;
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) thumbnail_image_key: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) thumbnail_image_key: Option<String>,
}

/// Store operations for posts and their category links.
///
/// `create_post` and `update_post` write the scalar fields and replace the
/// post's link rows as one unit: either both land or neither does.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(
        &self,
        input: NewPost,
        categories: &CategorySet,
    ) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn update_post(
        &self,
        id: i64,
        patch: PostPatch,
        categories: &CategorySet,
    ) -> Result<Option<Post>, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_posts(&self) -> Result<Vec<Post>, DomainError>;
}

#[async_trait]
impl<T: PostRepository + ?Sized> PostRepository for Arc<T> {
    async fn create_post(
        &self,
        input: NewPost,
        categories: &CategorySet,
    ) -> Result<Post, DomainError> {
        (**self).create_post(input, categories).await
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        (**self).get_post(id).await
    }

    async fn update_post(
        &self,
        id: i64,
        patch: PostPatch,
        categories: &CategorySet,
    ) -> Result<Option<Post>, DomainError> {
        (**self).update_post(id, patch, categories).await
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        (**self).delete_post(id).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        (**self).list_posts().await
    }
}
