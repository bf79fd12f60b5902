use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::category_repository::CategoryRepository;
use crate::domain::category::Category;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create_category(&self, name: String) -> Result<Category, DomainError> {
        let row: CategoryRow = sqlx::query_as(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(&name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        map_row_to_category(row)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        row.map(map_row_to_category).transpose()
    }

    async fn update_category(
        &self,
        id: i64,
        name: String,
    ) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> = sqlx::query_as(
            r#"
            UPDATE categories
            SET name = $2,
                updated_at = GREATEST(NOW(), created_at)
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        row.map(map_row_to_category).transpose()
    }

    async fn delete_category(&self, id: i64) -> Result<bool, DomainError> {
        // post_categories rows referencing it go through ON DELETE CASCADE.
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let rows: Vec<CategoryRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, updated_at
            FROM categories
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_category_db_error)?;

        rows.into_iter().map(map_row_to_category).collect()
    }
}

fn map_row_to_category(row: CategoryRow) -> Result<Category, DomainError> {
    Category::new(row.id, row.name, row.created_at, row.updated_at)
        .map_err(|err| DomainError::Store(err.to_string()))
}

fn map_category_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Store(err.to_string())
}
