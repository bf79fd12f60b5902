use tracing::info;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest, validate_post_id};

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates the post and links it to every requested category, or
    /// persists nothing at all.
    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let draft = req.validate()?;

        let new_post = NewPost {
            title: draft.title,
            content: draft.content,
            thumbnail_image_key: draft.thumbnail_image_key,
        };
        let post = self.repo.create_post(new_post, &draft.categories).await?;

        info!(
            post_id = post.id,
            categories = post.categories.len(),
            "post created"
        );
        Ok(post)
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        validate_post_id(id)?;
        self.repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    /// Overwrites every scalar field and replaces the category set.
    pub(crate) async fn update_post(
        &self,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        validate_post_id(post_id)?;
        let draft = req.validate()?;

        let patch = PostPatch {
            title: draft.title,
            content: draft.content,
            thumbnail_image_key: draft.thumbnail_image_key,
        };
        let post = self
            .repo
            .update_post(post_id, patch, &draft.categories)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))?;

        info!(
            post_id,
            categories = post.categories.len(),
            "post updated"
        );
        Ok(post)
    }

    pub(crate) async fn delete_post(&self, post_id: i64) -> Result<(), DomainError> {
        validate_post_id(post_id)?;

        let deleted = self.repo.delete_post(post_id).await?;
        if !deleted {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }

        info!(post_id, "post deleted");
        Ok(())
    }

    /// All posts, newest first. There is no paging: the admin list is a full scan.
    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.list_posts().await
    }
}
