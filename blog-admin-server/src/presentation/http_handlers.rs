use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use super::app_error::ErrorBody;
use super::{AppState, routes};

/// Public health route plus the gated admin routes, with state attached.
pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(routes::router(state.clone()))
        .with_state(state)
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthDto {
    pub(crate) status: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Store reachable", body = HealthDto),
        (status = 503, description = "Store unreachable", body = ErrorBody)
    )
)]
pub(crate) async fn healthz(State(state): State<AppState>) -> Response {
    match state.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthDto {
                status: "ok".to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            warn!(error = %err, "store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody {
                    status: "unavailable".to_string(),
                    message: "store unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}
