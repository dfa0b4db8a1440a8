pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod password;

pub use auth::{Claims, JwtAuth};
pub use config::{JwtConfig, JwtSettings};
pub use error::AppError;
pub use models::{Company, Employee, NewCompany, NewEmployee, NewUser, User};
