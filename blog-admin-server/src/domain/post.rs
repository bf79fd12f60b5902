use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::{CategorySet, CategorySummary};
use super::error::DomainError;

const MAX_THUMBNAIL_KEY_LEN: usize = 1024;

/// A post together with the categories it is currently linked to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) thumbnail_image_key: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) thumbnail_image_key: Option<String>,
    pub(crate) category_ids: Vec<i64>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<PostDraft, DomainError> {
        PostDraft::build(
            &self.title,
            &self.content,
            self.thumbnail_image_key.as_deref(),
            self.category_ids,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) thumbnail_image_key: Option<String>,
    pub(crate) category_ids: Vec<i64>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<PostDraft, DomainError> {
        PostDraft::build(
            &self.title,
            &self.content,
            self.thumbnail_image_key.as_deref(),
            self.category_ids,
        )
    }
}

/// Normalized post fields plus the category set they must end up linked to.
#[derive(Debug, Clone)]
pub(crate) struct PostDraft {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) thumbnail_image_key: Option<String>,
    pub(crate) categories: CategorySet,
}

impl PostDraft {
    fn build(
        title: &str,
        content: &str,
        thumbnail_image_key: Option<&str>,
        category_ids: Vec<i64>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(title)?,
            content: normalize_content(content)?,
            thumbnail_image_key: normalize_thumbnail_key(thumbnail_image_key)?,
            categories: CategorySet::from_ids(category_ids)?,
        })
    }
}

impl Post {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        thumbnail_image_key: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        categories: Vec<CategorySummary>,
    ) -> Result<Self, DomainError> {
        validate_post_id(id)?;
        let title = normalize_title(&title.into())?;
        let content = normalize_content(&content.into())?;
        let thumbnail_image_key = normalize_thumbnail_key(thumbnail_image_key.as_deref())?;

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            title,
            content,
            thumbnail_image_key,
            created_at,
            updated_at,
            categories,
        })
    }
}

pub(crate) fn validate_post_id(id: i64) -> Result<(), DomainError> {
    if id <= 0 {
        return Err(DomainError::Validation {
            field: "id",
            message: "must be > 0",
        });
    }
    Ok(())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    Ok(content.to_string())
}

// Blank keys come from cleared upload widgets and mean "no thumbnail".
fn normalize_thumbnail_key(key: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(key) = key.map(str::trim).filter(|key| !key.is_empty()) else {
        return Ok(None);
    };
    if key.chars().count() > MAX_THUMBNAIL_KEY_LEN {
        return Err(DomainError::Validation {
            field: "thumbnail_image_key",
            message: "must be at most 1024 chars",
        });
    }
    Ok(Some(key.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{CreatePostRequest, DomainError, Post, UpdatePostRequest};

    #[test]
    fn create_post_request_validate_rejects_empty_title() {
        let req = CreatePostRequest {
            title: "   ".to_string(),
            content: "valid content".to_string(),
            thumbnail_image_key: None,
            category_ids: vec![],
        };

        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn update_post_request_validate_rejects_empty_content() {
        let req = UpdatePostRequest {
            title: "valid title".to_string(),
            content: "   ".to_string(),
            thumbnail_image_key: None,
            category_ids: vec![1],
        };

        let err = req.validate().expect_err("content must be rejected");
        assert_validation_field(err, "content");
    }

    #[test]
    fn create_post_request_validate_normalizes_fields() {
        let req = CreatePostRequest {
            title: "  title  ".to_string(),
            content: "  content  ".to_string(),
            thumbnail_image_key: Some("  thumbs/a.png ".to_string()),
            category_ids: vec![2, 1, 2],
        };

        let draft = req.validate().expect("must validate");
        assert_eq!(draft.title, "title");
        assert_eq!(draft.content, "content");
        assert_eq!(draft.thumbnail_image_key.as_deref(), Some("thumbs/a.png"));
        assert_eq!(draft.categories.iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn blank_thumbnail_key_becomes_none() {
        let req = UpdatePostRequest {
            title: "title".to_string(),
            content: "content".to_string(),
            thumbnail_image_key: Some("   ".to_string()),
            category_ids: vec![],
        };

        let draft = req.validate().expect("must validate");
        assert!(draft.thumbnail_image_key.is_none());
    }

    #[test]
    fn oversized_thumbnail_key_is_rejected() {
        let req = CreatePostRequest {
            title: "title".to_string(),
            content: "content".to_string(),
            thumbnail_image_key: Some("k".repeat(1025)),
            category_ids: vec![],
        };

        let err = req.validate().expect_err("key must be rejected");
        assert_validation_field(err, "thumbnail_image_key");
    }

    #[test]
    fn invalid_category_id_fails_post_validation() {
        let req = CreatePostRequest {
            title: "title".to_string(),
            content: "content".to_string(),
            thumbnail_image_key: None,
            category_ids: vec![1, -1],
        };

        let err = req.validate().expect_err("category id must be rejected");
        assert_validation_field(err, "categories");
    }

    #[test]
    fn post_new_normalizes_and_builds_post() {
        let created_at = Utc::now();
        let updated_at = created_at + Duration::seconds(1);

        let post = Post::new(
            1,
            "  Title  ",
            "  Content  ",
            Some("key".to_string()),
            created_at,
            updated_at,
            vec![],
        )
        .expect("post should be created");

        assert_eq!(post.id, 1);
        assert_eq!(post.title, "Title");
        assert_eq!(post.content, "Content");
        assert_eq!(post.thumbnail_image_key.as_deref(), Some("key"));
    }

    #[test]
    fn post_new_rejects_non_positive_id() {
        let now = Utc::now();
        let err = Post::new(0, "Title", "Content", None, now, now, vec![])
            .expect_err("id must be > 0");
        assert_validation_field(err, "id");
    }

    #[test]
    fn post_new_rejects_updated_before_created() {
        let updated_at = Utc::now();
        let created_at = updated_at + Duration::seconds(1);

        let err = Post::new(1, "Title", "Content", None, created_at, updated_at, vec![])
            .expect_err("updated_at < created_at must fail");
        assert_validation_field(err, "updated_at");
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
