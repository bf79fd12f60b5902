use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::post_categories::{load_post_categories, replace_post_categories};
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::category::{CategorySet, CategorySummary};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    thumbnail_image_key: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(
        &self,
        input: NewPost,
        categories: &CategorySet,
    ) -> Result<Post, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_post_db_error)?;

        let row: PostRow = sqlx::query_as(
            r#"
            INSERT INTO posts (title, content, thumbnail_image_key)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, thumbnail_image_key, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.thumbnail_image_key.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        replace_post_categories(&mut tx, row.id, categories).await?;
        let mut linked = load_post_categories(&mut *tx, &[row.id]).await?;

        tx.commit().await.map_err(map_post_db_error)?;

        let linked = linked.remove(&row.id).unwrap_or_default();
        map_row_to_post(row, linked)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row: Option<PostRow> = sqlx::query_as(
            r#"
            SELECT
                id,
                title,
                content,
                thumbnail_image_key,
                created_at,
                updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut linked = load_post_categories(&self.pool, &[row.id]).await?;
        let linked = linked.remove(&row.id).unwrap_or_default();
        map_row_to_post(row, linked).map(Some)
    }

    async fn update_post(
        &self,
        id: i64,
        patch: PostPatch,
        categories: &CategorySet,
    ) -> Result<Option<Post>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_post_db_error)?;

        let row: Option<PostRow> = sqlx::query_as(
            r#"
            UPDATE posts
            SET title = $2,
                content = $3,
                thumbnail_image_key = $4,
                updated_at = GREATEST(NOW(), created_at)
            WHERE id = $1
            RETURNING id, title, content, thumbnail_image_key, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.content)
        .bind(patch.thumbnail_image_key.as_deref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        // Dropping `tx` without commit rolls back.
        let Some(row) = row else {
            return Ok(None);
        };

        replace_post_categories(&mut tx, row.id, categories).await?;
        let mut linked = load_post_categories(&mut *tx, &[row.id]).await?;

        tx.commit().await.map_err(map_post_db_error)?;

        let linked = linked.remove(&row.id).unwrap_or_default();
        map_row_to_post(row, linked).map(Some)
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_post_db_error)?;

        // The FK cascades too; clearing here keeps the invariant even if it
        // is ever dropped from the schema.
        sqlx::query(
            r#"
            DELETE FROM post_categories
            WHERE post_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await.map_err(map_post_db_error)?;
        Ok(true)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT
                id,
                title,
                content,
                thumbnail_image_key,
                created_at,
                updated_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut linked = load_post_categories(&self.pool, &ids).await?;

        rows.into_iter()
            .map(|row| {
                let categories = linked.remove(&row.id).unwrap_or_default();
                map_row_to_post(row, categories)
            })
            .collect()
    }
}

fn map_row_to_post(row: PostRow, categories: Vec<CategorySummary>) -> Result<Post, DomainError> {
    Post::new(
        row.id,
        row.title,
        row.content,
        row.thumbnail_image_key,
        row.created_at,
        row.updated_at,
        categories,
    )
    .map_err(|err| DomainError::Store(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Store(err.to_string())
}
