use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use companies_core::models::NewUser;
use companies_core::{AppError, password};

use crate::dto::{TokenDto, UserForAuthenticationDto, UserForRegistrationDto};
use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

const LOGIN_FAILED: &str = "Wrong user name or password";

#[utoipa::path(
    post,
    path = "/api/authentication",
    request_body = UserForRegistrationDto,
    responses(
        (status = 201, description = "User registered"),
        (status = 409, description = "User name already taken", body = crate::dto::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::dto::ErrorResponse),
    ),
    tag = "authentication"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<UserForRegistrationDto>,
) -> Result<impl IntoResponse, ApiError> {
    let password = body.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash(&password))
        .await
        .map_err(|e| AppError::Generic(format!("Hashing task failed: {e}")))??;

    let user = state
        .db
        .users()
        .create(&NewUser {
            first_name: body.first_name,
            last_name: body.last_name,
            user_name: body.user_name,
            email: body.email,
            phone_number: body.phone_number,
            password_hash,
            roles: body.roles,
        })
        .await?;

    tracing::info!(user = %user.user_name, roles = ?user.roles, "User registered");
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    post,
    path = "/api/authentication/login",
    request_body = UserForAuthenticationDto,
    responses(
        (status = 200, description = "Bearer token", body = TokenDto),
        (status = 401, description = "Wrong user name or password", body = crate::dto::ErrorResponse),
    ),
    tag = "authentication"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<UserForAuthenticationDto>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(user) = state.db.users().find_by_user_name(&body.user_name).await? else {
        tracing::warn!(user = %body.user_name, "Authentication failed: unknown user");
        return Err(AppError::Unauthorized(LOGIN_FAILED.into()).into());
    };

    let hash = user.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || password::verify(&body.password, &hash))
        .await
        .map_err(|e| AppError::Generic(format!("Verification task failed: {e}")))?;

    if !verified {
        tracing::warn!(user = %user.user_name, "Authentication failed: wrong password");
        return Err(AppError::Unauthorized(LOGIN_FAILED.into()).into());
    }

    let token = state.jwt.issue(&user.user_name, &user.roles)?;
    Ok(axum::Json(TokenDto {
        token,
        expires_in: state.jwt.lifetime_secs(),
    }))
}
