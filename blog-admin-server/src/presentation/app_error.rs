use crate::domain::error::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("rejected request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("unauthorized")]
    Unauthorized,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorBody {
    pub(crate) status: String,
    pub(crate) message: String,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, msg) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. } => {
                    (StatusCode::BAD_REQUEST, "validation_error", err.to_string())
                }
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
                DomainError::Store(_) => {
                    error!(error = %err, "store failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal_error",
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Validation(err) => {
                (StatusCode::BAD_REQUEST, "validation_error", err.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::Rejected { status, message } => (status, rejection_kind(status), message),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "unauthorized".to_string(),
            ),
        };

        (
            status,
            Json(ErrorBody {
                status: kind.to_string(),
                message: msg,
            }),
        )
            .into_response()
    }
}

fn rejection_kind(status: StatusCode) -> &'static str {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable_entity",
        status if status.is_server_error() => "internal_error",
        _ => "bad_request",
    }
}
