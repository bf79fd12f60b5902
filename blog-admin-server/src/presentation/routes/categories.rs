use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/admin/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}
