use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use companies_core::AppError;
use companies_core::models::{Employee, NewEmployee};

use crate::dto::{EmployeeDto, EmployeeForCreationDto, EmployeeForUpdateDto};
use crate::error::ApiError;
use crate::extract::{JsonBody, Validate, ValidatedJson};
use crate::negotiate::ResponseFormat;
use crate::patch::merge_patch;
use crate::routes::companies::company_or_404;
use crate::state::AppState;

fn employee_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Employee with id: {id} doesn't exist in the database."))
}

/// Look up an employee of an existing company, 404 if either is missing.
async fn employee_or_404(
    state: &AppState,
    company_id: Uuid,
    id: Uuid,
) -> Result<Employee, ApiError> {
    company_or_404(state, company_id).await?;
    state
        .db
        .employees()
        .get_for_company_by_id(company_id, id)
        .await?
        .ok_or_else(|| employee_not_found(id).into())
}

async fn save(state: &AppState, employee: &Employee) -> Result<(), ApiError> {
    if !state.db.employees().update(employee).await? {
        return Err(employee_not_found(employee.id).into());
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/employees",
    params(("company_id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Employees of the company", body = Vec<EmployeeDto>),
        (status = 404, description = "Company not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "employees"
)]
pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<Uuid>,
    format: ResponseFormat,
) -> Result<Response, ApiError> {
    company_or_404(&state, company_id).await?;
    let employees = state.db.employees().get_for_company(company_id).await?;

    let dtos: Vec<EmployeeDto> = employees.into_iter().map(Into::into).collect();
    format.render(StatusCode::OK, &dtos)
}

#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/employees/{id}",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("id" = Uuid, Path, description = "Employee ID"),
    ),
    responses(
        (status = 200, description = "Employee details", body = EmployeeDto),
        (status = 404, description = "Company or employee not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "employees"
)]
pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path((company_id, id)): Path<(Uuid, Uuid)>,
    format: ResponseFormat,
) -> Result<Response, ApiError> {
    let employee = employee_or_404(&state, company_id, id).await?;
    format.render_one(StatusCode::OK, &EmployeeDto::from(employee))
}

#[utoipa::path(
    post,
    path = "/api/companies/{company_id}/employees",
    params(("company_id" = Uuid, Path, description = "Company ID")),
    request_body = EmployeeForCreationDto,
    responses(
        (status = 201, description = "Employee created", body = EmployeeDto),
        (status = 404, description = "Company not found", body = crate::dto::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "employees"
)]
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<EmployeeForCreationDto>,
) -> Result<impl IntoResponse, ApiError> {
    company_or_404(&state, company_id).await?;
    let employee = state
        .db
        .employees()
        .create(company_id, &NewEmployee::from(&body))
        .await?;

    let location = format!("/api/companies/{company_id}/employees/{}", employee.id);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(&location)
            .map_err(|e| AppError::Generic(format!("Invalid Location header: {e}")))?,
    );

    Ok((StatusCode::CREATED, headers, axum::Json(EmployeeDto::from(employee))))
}

#[utoipa::path(
    put,
    path = "/api/companies/{company_id}/employees/{id}",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("id" = Uuid, Path, description = "Employee ID"),
    ),
    request_body = EmployeeForUpdateDto,
    responses(
        (status = 204, description = "Employee updated"),
        (status = 404, description = "Company or employee not found", body = crate::dto::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "employees"
)]
pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path((company_id, id)): Path<(Uuid, Uuid)>,
    ValidatedJson(body): ValidatedJson<EmployeeForUpdateDto>,
) -> Result<impl IntoResponse, ApiError> {
    let mut employee = employee_or_404(&state, company_id, id).await?;
    body.apply_to(&mut employee);
    save(&state, &employee).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/companies/{company_id}/employees/{id}",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("id" = Uuid, Path, description = "Employee ID"),
    ),
    request_body(
        content = EmployeeForUpdateDto,
        content_type = "application/merge-patch+json",
        description = "JSON merge patch; omitted fields keep their value"
    ),
    responses(
        (status = 204, description = "Employee patched"),
        (status = 400, description = "Malformed patch document", body = crate::dto::ErrorResponse),
        (status = 404, description = "Company or employee not found", body = crate::dto::ErrorResponse),
        (status = 422, description = "Patched employee is invalid", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "employees"
)]
pub async fn patch_employee(
    State(state): State<Arc<AppState>>,
    Path((company_id, id)): Path<(Uuid, Uuid)>,
    JsonBody(patch): JsonBody<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    if !patch.is_object() {
        return Err(AppError::BadRequest("Patch document must be a JSON object".into()).into());
    }

    let mut employee = employee_or_404(&state, company_id, id).await?;

    let mut document =
        serde_json::to_value(EmployeeForUpdateDto::from(&employee)).map_err(AppError::from)?;
    merge_patch(&mut document, &patch);
    let patched: EmployeeForUpdateDto = serde_json::from_value(document)
        .map_err(|e| AppError::Validation(e.to_string()))?;
    patched
        .check()
        .map_err(|violations| AppError::Validation(violations.join("; ")))?;

    patched.apply_to(&mut employee);
    save(&state, &employee).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/companies/{company_id}/employees/{id}",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        ("id" = Uuid, Path, description = "Employee ID"),
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Company or employee not found", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer" = [])),
    tag = "employees"
)]
pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path((company_id, id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    employee_or_404(&state, company_id, id).await?;
    if !state.db.employees().delete(company_id, id).await? {
        return Err(employee_not_found(id).into());
    }

    Ok(StatusCode::NO_CONTENT)
}
