pub(crate) mod category_repository;
pub(crate) mod post_categories;
pub(crate) mod post_repository;
pub(crate) mod store_health;

#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = crate::infrastructure::database::create_pool(&url, 5)
        .await
        .expect("pool creation failed");
    crate::infrastructure::database::run_migrations(&pool)
        .await
        .expect("migrations failed");
    pool
}
