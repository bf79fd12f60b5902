use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Category {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Category {
    pub(crate) fn new(
        id: i64,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_category_id("id", id)?;
        let name = normalize_name(&name.into())?;

        if updated_at < created_at {
            return Err(DomainError::Validation {
                field: "updated_at",
                message: "must be >= created_at",
            });
        }

        Ok(Self {
            id,
            name,
            created_at,
            updated_at,
        })
    }
}

/// Category reduced to what a post embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CategorySummary {
    pub(crate) id: i64,
    pub(crate) name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CategoryRequest {
    pub(crate) name: String,
}

impl CategoryRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            name: normalize_name(&self.name)?,
        })
    }
}

/// De-duplicated set of category ids a post must be linked to.
///
/// Built once at the boundary from whatever the caller sent, so the link
/// writer never sees the same id twice. Iteration is in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CategorySet(BTreeSet<i64>);

impl CategorySet {
    pub(crate) fn from_ids(ids: impl IntoIterator<Item = i64>) -> Result<Self, DomainError> {
        let mut set = BTreeSet::new();
        for id in ids {
            validate_category_id("categories", id)?;
            set.insert(id);
        }
        Ok(Self(set))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

fn validate_category_id(field: &'static str, id: i64) -> Result<(), DomainError> {
    if id <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "category id must be > 0",
        });
    }
    Ok(())
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 64 {
        return Err(DomainError::Validation {
            field: "name",
            message: "must be 1..64 chars",
        });
    }
    Ok(name.to_string())
}
