use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser {
    pub(crate) user_id: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Rejects the request with 401 unless the identity provider vouches for its
/// credential. Nothing behind this layer runs for an unverified caller.
pub(crate) async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers())?.to_owned();

    let user = state.identity.resolve_user(&token).await.map_err(|err| {
        debug!(error = %err, "credential rejected");
        AppError::Unauthorized
    })?;

    debug!(user_id = %user.id, email = ?user.email, "credential accepted");
    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id: user.id });

    Ok(next.run(request).await)
}

/// Accepts `Bearer <token>` and, as the admin front-end sends it, a bare `<token>`.
pub(crate) fn extract_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let mut parts = auth_header.split_whitespace();
    let first = parts.next().ok_or(AppError::Unauthorized)?;
    let token = match (parts.next(), parts.next()) {
        (None, _) if !first.eq_ignore_ascii_case("bearer") => first,
        (Some(token), None) if first.eq_ignore_ascii_case("bearer") => token,
        _ => return Err(AppError::Unauthorized),
    };

    Ok(token)
}
