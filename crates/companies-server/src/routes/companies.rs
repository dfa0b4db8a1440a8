use std::sync::Arc;

use axum::Extension;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use companies_core::AppError;
use companies_core::models::{Company, NewCompany};

use crate::auth::AuthUser;
use crate::dto::{CompanyDto, CompanyForCreationDto, CompanyForUpdateDto, CompanySummaryDto};
use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::negotiate::ResponseFormat;
use crate::state::AppState;
use crate::versioning::ApiVersion;

pub(crate) fn company_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Company with id: {id} doesn't exist in the database."))
}

/// Look up a company or fail with 404.
pub(crate) async fn company_or_404(state: &AppState, id: Uuid) -> Result<Company, ApiError> {
    state
        .db
        .companies()
        .get_by_id(id)
        .await?
        .ok_or_else(|| company_not_found(id).into())
}

fn location(path: String) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&path)
        .map_err(|e| AppError::Generic(format!("Invalid Location header: {e}")))?;
    headers.insert(header::LOCATION, value);
    Ok(headers)
}

/// Parse a comma-separated list of company ids.
fn parse_ids(raw: &str) -> Result<Vec<Uuid>, AppError> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Uuid>()
                .map_err(|_| AppError::BadRequest(format!("'{s}' is not a valid company id")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(AppError::BadRequest("Parameter ids is empty".into()));
    }
    Ok(ids)
}

#[utoipa::path(
    get,
    path = "/api/companies",
    params(
        ("api-version" = Option<String>, Header, description = "1.0 (default) returns full companies, 2.0 returns id and name only"),
    ),
    responses(
        (status = 200, description = "All companies ordered by name", body = Vec<CompanyDto>),
        (status = 400, description = "Unsupported API version", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
        (status = 406, description = "Unsupported Accept header", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "companies"
)]
pub async fn list_companies(
    State(state): State<Arc<AppState>>,
    Extension(version): Extension<ApiVersion>,
    format: ResponseFormat,
) -> Result<Response, ApiError> {
    let companies = state.db.companies().get_all().await?;

    if version >= ApiVersion::V2 {
        let summaries: Vec<CompanySummaryDto> = companies.iter().map(Into::into).collect();
        return format.render(StatusCode::OK, &summaries);
    }

    let dtos: Vec<CompanyDto> = companies.iter().map(Into::into).collect();
    format.render(StatusCode::OK, &dtos)
}

#[utoipa::path(
    get,
    path = "/api/companies/{company_id}",
    params(("company_id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company details", body = CompanyDto),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "companies"
)]
pub async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    format: ResponseFormat,
) -> Result<Response, ApiError> {
    let company = company_or_404(&state, id).await?;
    format.render_one(StatusCode::OK, &CompanyDto::from(company))
}

#[utoipa::path(
    get,
    path = "/api/companies/collection/{ids}",
    params(("ids" = String, Path, description = "Comma-separated company IDs")),
    responses(
        (status = 200, description = "Requested companies", body = Vec<CompanyDto>),
        (status = 400, description = "Malformed id list", body = crate::dto::ErrorResponse),
        (status = 404, description = "Some ids do not exist", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "companies"
)]
pub async fn get_company_collection(
    State(state): State<Arc<AppState>>,
    Path(ids): Path<String>,
    format: ResponseFormat,
) -> Result<Response, ApiError> {
    let mut ids = parse_ids(&ids)?;
    ids.sort_unstable();
    ids.dedup();

    let companies = state.db.companies().get_by_ids(&ids).await?;
    if companies.len() != ids.len() {
        return Err(AppError::NotFound("Some ids are not valid in a collection".into()).into());
    }

    let dtos: Vec<CompanyDto> = companies.iter().map(Into::into).collect();
    format.render(StatusCode::OK, &dtos)
}

#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CompanyForCreationDto,
    responses(
        (status = 201, description = "Company created", body = CompanyDto),
        (status = 400, description = "Missing or malformed body", body = crate::dto::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "companies"
)]
pub async fn create_company(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    ValidatedJson(body): ValidatedJson<CompanyForCreationDto>,
) -> Result<impl IntoResponse, ApiError> {
    let (company, employees) = state
        .db
        .companies()
        .create_with_employees(&NewCompany::from(&body), &body.new_employees())
        .await?;

    tracing::info!(
        company_id = %company.id,
        employees = employees.len(),
        user = %claims.sub,
        "Company created"
    );

    let headers = location(format!("/api/companies/{}", company.id))?;
    Ok((StatusCode::CREATED, headers, axum::Json(CompanyDto::from(company))))
}

#[utoipa::path(
    post,
    path = "/api/companies/collection",
    request_body = Vec<CompanyForCreationDto>,
    responses(
        (status = 201, description = "Companies created", body = Vec<CompanyDto>),
        (status = 400, description = "Missing or empty body", body = crate::dto::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "companies"
)]
pub async fn create_company_collection(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<Vec<CompanyForCreationDto>>,
) -> Result<impl IntoResponse, ApiError> {
    if body.is_empty() {
        return Err(AppError::BadRequest("Company collection is empty".into()).into());
    }

    let items: Vec<_> = body
        .iter()
        .map(|item| (NewCompany::from(item), item.new_employees()))
        .collect();
    let created: Vec<CompanyDto> = state
        .db
        .companies()
        .create_many(&items)
        .await?
        .into_iter()
        .map(|(company, _)| CompanyDto::from(company))
        .collect();

    let ids = created
        .iter()
        .map(|c| c.id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let headers = location(format!("/api/companies/collection/{ids}"))?;
    Ok((StatusCode::CREATED, headers, axum::Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/companies/{company_id}",
    params(("company_id" = Uuid, Path, description = "Company ID")),
    request_body = CompanyForUpdateDto,
    responses(
        (status = 204, description = "Company updated"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "companies"
)]
pub async fn update_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<CompanyForUpdateDto>,
) -> Result<impl IntoResponse, ApiError> {
    let mut company = company_or_404(&state, id).await?;
    body.apply_to(&mut company);

    let updated = state
        .db
        .companies()
        .update_with_employees(&company, &body.new_employees())
        .await?;
    if !updated {
        return Err(company_not_found(id).into());
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/companies/{company_id}",
    params(("company_id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company and its employees deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "companies"
)]
pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.db.companies().delete(id).await? {
        return Err(company_not_found(id).into());
    }

    tracing::info!(company_id = %id, user = %claims.sub, "Company deleted");
    Ok(StatusCode::NO_CONTENT)
}
