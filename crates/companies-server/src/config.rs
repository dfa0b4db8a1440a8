use std::path::PathBuf;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use companies_core::AppError;

use crate::versioning::SUPPORTED_VERSIONS_HEADER;

/// Listener, settings file and CORS configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub settings_path: PathBuf,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `COMPANIES_SERVER_PORT` (optional, defaults to 5000)
    /// - `APPSETTINGS_PATH` (optional, defaults to `appsettings.json`)
    /// - `CORS_ALLOWED_ORIGINS` (optional, comma separated)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let port = match lookup("COMPANIES_SERVER_PORT") {
            None => 5000,
            Some(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid COMPANIES_SERVER_PORT '{raw}'"))
            })?,
        };

        let settings_path = lookup("APPSETTINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("appsettings.json"));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            port,
            settings_path,
            cors_allowed_origins,
        })
    }

    /// CORS policy: any origin, method and header unless origins are listed.
    pub fn cors_layer(&self) -> Result<CorsLayer, AppError> {
        let layer = CorsLayer::new().expose_headers([SUPPORTED_VERSIONS_HEADER]);

        if self.cors_allowed_origins.is_empty() {
            return Ok(layer
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any));
        }

        let origins = self
            .cors_allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o)
                    .map_err(|_| AppError::ConfigError(format!("Invalid CORS origin '{o}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                header::ACCEPT,
                crate::versioning::API_VERSION_HEADER,
            ]))
    }
}
