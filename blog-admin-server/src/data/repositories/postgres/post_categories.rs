//! Link rows between posts and categories.
//!
//! Writes use replace-all semantics: every link of the post is deleted and
//! the full new set is inserted. Both steps run on the caller's connection,
//! which is expected to be inside a transaction so a failed insert rolls the
//! post back to its previous category set.

use std::collections::HashMap;

use sqlx::{FromRow, PgConnection, PgExecutor};
use tracing::debug;

use crate::domain::category::{CategorySet, CategorySummary};
use crate::domain::error::DomainError;

const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(FromRow)]
struct LinkedCategoryRow {
    post_id: i64,
    id: i64,
    name: String,
}

pub(crate) async fn replace_post_categories(
    conn: &mut PgConnection,
    post_id: i64,
    categories: &CategorySet,
) -> Result<(), DomainError> {
    let removed = sqlx::query(
        r#"
        DELETE FROM post_categories
        WHERE post_id = $1
        "#,
    )
    .bind(post_id)
    .execute(&mut *conn)
    .await
    .map_err(map_link_db_error)?
    .rows_affected();

    // One row at a time; the link table has no bulk path we rely on.
    for category_id in categories.iter() {
        sqlx::query(
            r#"
            INSERT INTO post_categories (post_id, category_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(post_id)
        .bind(category_id)
        .execute(&mut *conn)
        .await
        .map_err(map_link_db_error)?;
    }

    debug!(
        post_id,
        removed,
        inserted = categories.len(),
        "post categories replaced"
    );
    Ok(())
}

/// Loads `{id, name}` of linked categories for every given post in one query.
/// Posts without links are absent from the map.
pub(crate) async fn load_post_categories<'e, E>(
    executor: E,
    post_ids: &[i64],
) -> Result<HashMap<i64, Vec<CategorySummary>>, DomainError>
where
    E: PgExecutor<'e>,
{
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<LinkedCategoryRow> = sqlx::query_as(
        r#"
        SELECT
            pc.post_id,
            c.id,
            c.name
        FROM post_categories pc
        JOIN categories c ON c.id = pc.category_id
        WHERE pc.post_id = ANY($1)
        ORDER BY pc.post_id, c.id
        "#,
    )
    .bind(post_ids)
    .fetch_all(executor)
    .await
    .map_err(map_link_db_error)?;

    let mut by_post: HashMap<i64, Vec<CategorySummary>> = HashMap::new();
    for row in rows {
        by_post.entry(row.post_id).or_default().push(CategorySummary {
            id: row.id,
            name: row.name,
        });
    }
    Ok(by_post)
}

fn map_link_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    {
        return DomainError::Validation {
            field: "categories",
            message: "unknown category id",
        };
    }
    DomainError::Store(err.to_string())
}
