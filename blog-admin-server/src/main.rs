use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;
#[cfg(test)]
mod test_support;

use application::category_service::CategoryService;
use application::post_service::PostService;
use data::category_repository::CategoryRepository;
use data::post_repository::PostRepository;
use data::repositories::postgres::category_repository::PostgresCategoryRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::store_health::PostgresStoreHealth;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::identity::{IdentityResolver, JwtIdentityResolver};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url, settings.database_max_connections).await?;
    run_migrations(&pool).await?;

    let post_repo: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(pool.clone()));
    let category_repo: Arc<dyn CategoryRepository> =
        Arc::new(PostgresCategoryRepository::new(pool.clone()));
    let identity: Arc<dyn IdentityResolver> = Arc::new(JwtIdentityResolver::new(
        &settings.auth_jwt_secret,
        &settings.auth_jwt_audience,
        settings.auth_jwt_issuer.as_deref(),
    ));

    let state = AppState::new(
        Arc::new(PostService::new(post_repo)),
        Arc::new(CategoryService::new(category_repo)),
        identity,
        Arc::new(PostgresStoreHealth::new(pool)),
    );

    info!("starting blog admin server");
    server::run_http(&settings, state).await
}
