use std::sync::Arc;

use crate::application::category_service::CategoryService;
use crate::application::post_service::PostService;
use crate::data::category_repository::CategoryRepository;
use crate::data::post_repository::PostRepository;
use crate::data::store_health::StoreHealth;
use crate::infrastructure::identity::IdentityResolver;

pub(crate) mod app_error;
pub(crate) mod extractors;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) type DynPostService = PostService<Arc<dyn PostRepository>>;
pub(crate) type DynCategoryService = CategoryService<Arc<dyn CategoryRepository>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) post_service: Arc<DynPostService>,
    pub(crate) category_service: Arc<DynCategoryService>,
    pub(crate) identity: Arc<dyn IdentityResolver>,
    pub(crate) health: Arc<dyn StoreHealth>,
}

impl AppState {
    pub(crate) fn new(
        post_service: Arc<DynPostService>,
        category_service: Arc<DynCategoryService>,
        identity: Arc<dyn IdentityResolver>,
        health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            post_service,
            category_service,
            identity,
            health,
        }
    }
}
