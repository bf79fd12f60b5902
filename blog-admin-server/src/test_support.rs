//! In-memory store used by service and router tests.
//!
//! Mirrors the Postgres repositories: create/update validate every category
//! id before touching anything, then write the post and replace its links in
//! one step, so a failure leaves the previous state intact.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::data::category_repository::CategoryRepository;
use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::data::store_health::StoreHealth;
use crate::domain::category::{Category, CategorySet, CategorySummary};
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::infrastructure::identity::{AuthError, IdentityResolver, VerifiedUser};

pub(crate) const VALID_TOKEN: &str = "valid-test-token";

#[derive(Clone)]
struct PostRecord {
    id: i64,
    title: String,
    content: String,
    thumbnail_image_key: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

struct StoreState {
    base_time: DateTime<Utc>,
    ticks: i64,
    next_post_id: i64,
    next_category_id: i64,
    posts: BTreeMap<i64, PostRecord>,
    categories: BTreeMap<i64, Category>,
    // (post_id, category_id); the set makes duplicate rows impossible like the PK does.
    links: BTreeSet<(i64, i64)>,
}

impl StoreState {
    // Strictly increasing timestamps keep ordering assertions deterministic.
    fn now(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        self.base_time + Duration::milliseconds(self.ticks)
    }

    fn check_categories(&self, categories: &CategorySet) -> Result<(), DomainError> {
        if categories
            .iter()
            .any(|id| !self.categories.contains_key(&id))
        {
            return Err(DomainError::Validation {
                field: "categories",
                message: "unknown category id",
            });
        }
        Ok(())
    }

    fn replace_links(&mut self, post_id: i64, categories: &CategorySet) {
        self.links.retain(|(linked_post, _)| *linked_post != post_id);
        for category_id in categories.iter() {
            self.links.insert((post_id, category_id));
        }
    }

    fn to_post(&self, record: &PostRecord) -> Post {
        let categories = self
            .links
            .iter()
            .filter(|(post_id, _)| *post_id == record.id)
            .filter_map(|(_, category_id)| self.categories.get(category_id))
            .map(|category| CategorySummary {
                id: category.id,
                name: category.name.clone(),
            })
            .collect::<Vec<_>>();

        Post::new(
            record.id,
            record.title.clone(),
            record.content.clone(),
            record.thumbnail_image_key.clone(),
            record.created_at,
            record.updated_at,
            categories,
        )
        .expect("stored post must be valid")
    }
}

pub(crate) struct InMemoryStore {
    state: Mutex<StoreState>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                base_time: Utc::now(),
                ticks: 0,
                next_post_id: 1,
                next_category_id: 1,
                posts: BTreeMap::new(),
                categories: BTreeMap::new(),
                links: BTreeSet::new(),
            }),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every following post write and ping fail as if the database went away.
    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn seed_category(&self, name: &str) -> i64 {
        let mut state = self.state.lock().expect("store mutex poisoned");
        let id = state.next_category_id;
        state.next_category_id += 1;
        let now = state.now();
        let category = Category::new(id, name, now, now).expect("seed category must be valid");
        state.categories.insert(id, category);
        id
    }

    pub(crate) fn linked_category_ids(&self, post_id: i64) -> Vec<i64> {
        let state = self.state.lock().expect("store mutex poisoned");
        state
            .links
            .iter()
            .filter(|(linked_post, _)| *linked_post == post_id)
            .map(|(_, category_id)| *category_id)
            .collect()
    }

    pub(crate) fn link_count(&self) -> usize {
        self.state.lock().expect("store mutex poisoned").links.len()
    }

    pub(crate) fn post_count(&self) -> usize {
        self.state.lock().expect("store mutex poisoned").posts.len()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Store("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn create_post(
        &self,
        input: NewPost,
        categories: &CategorySet,
    ) -> Result<Post, DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.check_categories(categories)?;

        let id = state.next_post_id;
        state.next_post_id += 1;
        let now = state.now();
        let record = PostRecord {
            id,
            title: input.title,
            content: input.content,
            thumbnail_image_key: input.thumbnail_image_key,
            created_at: now,
            updated_at: now,
        };
        state.posts.insert(id, record.clone());
        state.replace_links(id, categories);

        Ok(state.to_post(&record))
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.posts.get(&id).map(|record| state.to_post(record)))
    }

    async fn update_post(
        &self,
        id: i64,
        patch: PostPatch,
        categories: &CategorySet,
    ) -> Result<Option<Post>, DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().expect("store mutex poisoned");
        if !state.posts.contains_key(&id) {
            return Ok(None);
        }
        state.check_categories(categories)?;

        let now = state.now();
        let Some(record) = state.posts.get_mut(&id) else {
            return Ok(None);
        };
        record.title = patch.title;
        record.content = patch.content;
        record.thumbnail_image_key = patch.thumbnail_image_key;
        record.updated_at = now;
        let record = record.clone();

        state.replace_links(id, categories);
        Ok(Some(state.to_post(&record)))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        self.check_writable()?;
        let mut state = self.state.lock().expect("store mutex poisoned");
        if state.posts.remove(&id).is_none() {
            return Ok(false);
        }
        state.links.retain(|(post_id, _)| *post_id != id);
        Ok(true)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let state = self.state.lock().expect("store mutex poisoned");
        let mut records: Vec<&PostRecord> = state.posts.values().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records
            .into_iter()
            .map(|record| state.to_post(record))
            .collect())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn create_category(&self, name: String) -> Result<Category, DomainError> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        let id = state.next_category_id;
        state.next_category_id += 1;
        let now = state.now();
        let category = Category::new(id, name, now, now)?;
        state.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DomainError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.categories.get(&id).cloned())
    }

    async fn update_category(
        &self,
        id: i64,
        name: String,
    ) -> Result<Option<Category>, DomainError> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        let now = state.now();
        let Some(category) = state.categories.get_mut(&id) else {
            return Ok(None);
        };
        category.name = name;
        category.updated_at = now;
        Ok(Some(category.clone()))
    }

    async fn delete_category(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        if state.categories.remove(&id).is_none() {
            return Ok(false);
        }
        state.links.retain(|(_, category_id)| *category_id != id);
        Ok(true)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let state = self.state.lock().expect("store mutex poisoned");
        let mut categories: Vec<Category> = state.categories.values().cloned().collect();
        categories.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(categories)
    }
}

#[async_trait]
impl StoreHealth for InMemoryStore {
    async fn ping(&self) -> Result<(), DomainError> {
        self.check_writable()
    }
}

/// Accepts exactly [`VALID_TOKEN`].
pub(crate) struct StaticTokenResolver;

#[async_trait]
impl IdentityResolver for StaticTokenResolver {
    async fn resolve_user(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        if token == VALID_TOKEN {
            Ok(VerifiedUser {
                id: "test-admin".to_string(),
                email: Some("admin@example.com".to_string()),
            })
        } else {
            Err(AuthError::MissingCredential)
        }
    }
}
