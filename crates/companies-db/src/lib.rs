pub mod company_repository;
pub mod config;
pub mod database;
pub mod employee_repository;
pub mod user_repository;

pub use company_repository::CompanyRepository;
pub use config::DatabaseConfig;
pub use database::Database;
pub use employee_repository::EmployeeRepository;
pub use user_repository::UserRepository;
