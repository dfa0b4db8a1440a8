use uuid::Uuid;

/// A company as persisted in the `companies` table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub country: String,
}

/// An employee as persisted in the `employees` table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub position: String,
    pub company_id: Uuid,
}

/// An API user. Only the argon2 hash of the password is kept.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub roles: Vec<String>,
}

/// DTO for inserting a new company into the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub name: String,
    pub address: String,
    pub country: String,
}

/// DTO for inserting a new employee. The owning company is supplied separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub age: i32,
    pub position: String,
}

/// DTO for inserting a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: String,
    pub roles: Vec<String>,
}

/// Roles a user may be registered with.
pub const KNOWN_ROLES: &[&str] = &["Manager", "Administrator"];
