use std::sync::Arc;

use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use companies_core::{AppError, Claims};

use crate::error::ApiError;
use crate::state::AppState;

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("missing Authorization header".into()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Authorization header is not valid ASCII".into()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("expected: Bearer <token>".into()))
}

/// Middleware that validates the bearer token and stores its [`Claims`]
/// in the request extensions.
pub async fn require_jwt(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let claims = match bearer_token(request.headers()).and_then(|t| state.jwt.validate(t)) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(path = %request.uri().path(), "Rejected request: {err}");
            return ApiError(err).into_response();
        }
    };

    request.extensions_mut().insert(claims);
    next.run(request).await
}

/// The authenticated caller. Only available behind [`require_jwt`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthorized("request was not authenticated".into()).into())
    }
}
