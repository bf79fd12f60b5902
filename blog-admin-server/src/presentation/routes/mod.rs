use axum::Router;
use axum::middleware;

use super::AppState;
use super::middleware::auth::auth_middleware;

pub(crate) mod categories;
pub(crate) mod posts;

/// Every admin route sits behind the credential check, reads included.
pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(posts::router())
        .merge(categories::router())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
