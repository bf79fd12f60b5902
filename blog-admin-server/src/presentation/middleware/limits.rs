use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::{Json, Router};
use axum::http::StatusCode;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::warn;

use crate::infrastructure::settings::Settings;
use crate::presentation::app_error::ErrorBody;

// The store client has no timeout of its own; this is the only bound on a request.
pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    let timeout = Duration::from_secs(settings.http_request_timeout_secs);

    router
        .layer(RequestBodyLimitLayer::new(
            settings.http_request_body_limit_bytes,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_layer_error))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(ConcurrencyLimitLayer::new(settings.http_concurrency_limit))
}

async fn handle_layer_error(err: BoxError) -> (StatusCode, Json<ErrorBody>) {
    if err.is::<Elapsed>() {
        warn!("request timed out");
        return layer_error(StatusCode::REQUEST_TIMEOUT, "timeout", "request timed out");
    }
    warn!(error = %err, "unhandled middleware error");
    layer_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "internal error",
    )
}

fn layer_error(
    status: StatusCode,
    kind: &str,
    message: &str,
) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            status: kind.to_string(),
            message: message.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tower::BoxError;
    use tower::timeout::error::Elapsed;

    use super::handle_layer_error;

    #[tokio::test]
    async fn elapsed_becomes_408_error_body() {
        let (status, body) = handle_layer_error(BoxError::from(Elapsed::new())).await;

        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body.status, "timeout");
        assert_eq!(body.message, "request timed out");
    }

    #[tokio::test]
    async fn other_layer_errors_hide_details() {
        let (status, body) = handle_layer_error(BoxError::from("overloaded shard 7")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status, "internal_error");
        assert_eq!(body.message, "internal error");
    }
}
