//! REST API server: routes, bearer authentication, versioning, DTOs and OpenAPI documentation.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod mapping;
pub mod negotiate;
pub mod openapi;
pub mod patch;
pub mod routes;
pub mod state;
pub mod versioning;
