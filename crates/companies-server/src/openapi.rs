use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CompanyEmployees API",
        version = "v1",
        description = "Companies and their employees, protected by bearer tokens.",
        terms_of_service = "https://example.com/terms",
        contact(name = "API Support", email = "support@example.com", url = "https://example.com/support"),
        license(name = "CompanyEmployees API License", url = "https://example.com/license")
    ),
    paths(
        crate::routes::companies::list_companies,
        crate::routes::companies::get_company,
        crate::routes::companies::get_company_collection,
        crate::routes::companies::create_company,
        crate::routes::companies::create_company_collection,
        crate::routes::companies::update_company,
        crate::routes::companies::delete_company,
        crate::routes::employees::list_employees,
        crate::routes::employees::get_employee,
        crate::routes::employees::create_employee,
        crate::routes::employees::update_employee,
        crate::routes::employees::patch_employee,
        crate::routes::employees::delete_employee,
        crate::routes::authentication::register,
        crate::routes::authentication::login,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::CompanyDto,
        crate::dto::CompanyForCreationDto,
        crate::dto::CompanyForUpdateDto,
        crate::dto::EmployeeDto,
        crate::dto::EmployeeForCreationDto,
        crate::dto::EmployeeForUpdateDto,
        crate::dto::UserForRegistrationDto,
        crate::dto::UserForAuthenticationDto,
        crate::dto::TokenDto,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "companies", description = "Company management"),
        (name = "employees", description = "Employees of a company"),
        (name = "authentication", description = "User registration and token issuance"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Version 2.0 surface: send `api-version: 2.0` to get it.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CompanyEmployees API",
        version = "v2",
        description = "Version 2.0 company listing returns id and name only."
    ),
    paths(crate::routes::companies::list_companies),
    components(schemas(crate::dto::CompanySummaryDto, crate::dto::ErrorResponse)),
    tags((name = "companies", description = "Company management")),
    modifiers(&SecurityAddon)
)]
pub struct ApiDocV2;

/// Adds Bearer token security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            utoipa::openapi::security::SecurityScheme::Http(
                utoipa::openapi::security::HttpBuilder::new()
                    .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Place to add JWT with Bearer"))
                    .build(),
            ),
        );
    }
}
