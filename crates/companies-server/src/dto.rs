use serde::{Deserialize, Serialize};
use uuid::Uuid;

use companies_core::models::KNOWN_ROLES;

use crate::extract::{Validate, Violations};

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub id: Uuid,
    pub name: String,
    /// Address and country separated by a space
    pub full_address: String,
}

/// Company listing returned under API version 2.0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummaryDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForCreationDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub country: String,
    /// Employees created together with the company
    pub employees: Option<Vec<EmployeeForCreationDto>>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForUpdateDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub country: String,
    /// Employees to add to the company
    pub employees: Option<Vec<EmployeeForCreationDto>>,
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub position: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForCreationDto {
    #[serde(default)]
    pub name: String,
    pub age: Option<i32>,
    #[serde(default)]
    pub position: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForUpdateDto {
    #[serde(default)]
    pub name: String,
    pub age: Option<i32>,
    #[serde(default)]
    pub position: String,
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserForRegistrationDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// Any of "Manager", "Administrator"
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserForAuthenticationDto {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenDto {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Health & errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Validation rules
// ---------------------------------------------------------------------------

const COMPANY_NAME_MAX: usize = 30;
const COMPANY_ADDRESS_MAX: usize = 60;
const COMPANY_COUNTRY_MAX: usize = 60;
const EMPLOYEE_NAME_MAX: usize = 30;
const EMPLOYEE_POSITION_MAX: usize = 20;
const MIN_EMPLOYEE_AGE: i32 = 18;
const USER_NAME_MAX: usize = 256;
const PERSON_NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 256;
const PHONE_MAX: usize = 50;

fn check_company(v: &mut Violations, name: &str, address: &str, country: &str) {
    v.required_max("name", name, COMPANY_NAME_MAX);
    v.required_max("address", address, COMPANY_ADDRESS_MAX);
    v.required_max("country", country, COMPANY_COUNTRY_MAX);
}

fn check_employee(v: &mut Violations, name: &str, age: Option<i32>, position: &str) {
    v.required_max("name", name, EMPLOYEE_NAME_MAX);
    match age {
        None => v.push("age", "is required"),
        Some(age) if age < MIN_EMPLOYEE_AGE => {
            v.push("age", format!("can't be lower than {MIN_EMPLOYEE_AGE}"))
        }
        Some(_) => {}
    }
    v.required_max("position", position, EMPLOYEE_POSITION_MAX);
}

impl Validate for CompanyForCreationDto {
    fn validate(&self, v: &mut Violations) {
        check_company(v, &self.name, &self.address, &self.country);
        v.nested("employees", self.employees.iter().flatten());
    }
}

impl Validate for CompanyForUpdateDto {
    fn validate(&self, v: &mut Violations) {
        check_company(v, &self.name, &self.address, &self.country);
        v.nested("employees", self.employees.iter().flatten());
    }
}

impl Validate for EmployeeForCreationDto {
    fn validate(&self, v: &mut Violations) {
        check_employee(v, &self.name, self.age, &self.position);
    }
}

impl Validate for EmployeeForUpdateDto {
    fn validate(&self, v: &mut Violations) {
        check_employee(v, &self.name, self.age, &self.position);
    }
}

impl Validate for UserForRegistrationDto {
    fn validate(&self, v: &mut Violations) {
        v.required_max("userName", &self.user_name, USER_NAME_MAX);
        v.required("password", &self.password);
        v.max("firstName", self.first_name.as_deref(), PERSON_NAME_MAX);
        v.max("lastName", self.last_name.as_deref(), PERSON_NAME_MAX);
        v.max("email", self.email.as_deref(), EMAIL_MAX);
        v.max("phoneNumber", self.phone_number.as_deref(), PHONE_MAX);
        for role in &self.roles {
            if !KNOWN_ROLES.contains(&role.as_str()) {
                v.push("roles", format!("unknown role '{role}'"));
            }
        }
    }
}

impl Validate for UserForAuthenticationDto {
    fn validate(&self, v: &mut Violations) {
        v.required("userName", &self.user_name);
        v.required("password", &self.password);
    }
}
