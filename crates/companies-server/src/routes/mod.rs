use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::{SwaggerUi, Url};

use crate::auth::require_jwt;
use crate::dto::HealthResponse;
use crate::openapi::{ApiDoc, ApiDocV2};
use crate::state::AppState;
use crate::versioning::negotiate_version;

pub mod authentication;
pub mod companies;
pub mod employees;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route(
            "/api/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/api/companies/collection",
            post(companies::create_company_collection),
        )
        .route(
            "/api/companies/collection/{ids}",
            get(companies::get_company_collection),
        )
        .route(
            "/api/companies/{company_id}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route(
            "/api/companies/{company_id}/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/api/companies/{company_id}/employees/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .patch(employees::patch_employee)
                .delete(employees::delete_employee),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_jwt));

    let api = Router::new()
        .route("/api/authentication", post(authentication::register))
        .route("/api/authentication/login", post(authentication::login))
        .merge(protected)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            negotiate_version,
        ));

    let public = Router::new().route("/health", get(health)).merge(
        SwaggerUi::new("/swagger-ui")
            .url(
                Url::new("CompanyEmployees API v1", "/swagger/v1/swagger.json"),
                ApiDoc::openapi(),
            )
            .url(
                Url::new("CompanyEmployees API v2", "/swagger/v2/swagger.json"),
                ApiDocV2::openapi(),
            ),
    );

    public.merge(api).with_state(state)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let healthy = match state.db.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check failed: {e}");
            false
        }
    };

    let (status, response) = if healthy {
        (
            StatusCode::OK,
            HealthResponse {
                status: "healthy",
                database: "ok",
            },
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            HealthResponse {
                status: "unhealthy",
                database: "error",
            },
        )
    };

    (status, axum::Json(response))
}
