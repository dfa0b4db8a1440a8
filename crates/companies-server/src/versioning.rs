//! Header-based API versioning.
//!
//! Clients pick a version with `api-version: 2.0`. Requests without the
//! header get the default version, and every response reports the
//! supported versions in `api-supported-versions`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use companies_core::AppError;

use crate::error::ApiError;
use crate::state::AppState;

pub const API_VERSION_HEADER: HeaderName = HeaderName::from_static("api-version");
pub const SUPPORTED_VERSIONS_HEADER: HeaderName =
    HeaderName::from_static("api-supported-versions");

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    pub const V1: ApiVersion = ApiVersion::new(1, 0);
    pub const V2: ApiVersion = ApiVersion::new(2, 0);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    /// Accepts `"2"` and `"2.0"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, "0"),
        };
        match (major.parse(), minor.parse()) {
            (Ok(major), Ok(minor)) => Ok(Self::new(major, minor)),
            _ => Err(format!("'{s}' is not a valid API version")),
        }
    }
}

/// Versioning policy: default version and the set of supported versions.
#[derive(Debug, Clone)]
pub struct ApiVersioning {
    pub default: ApiVersion,
    pub supported: Vec<ApiVersion>,
}

impl Default for ApiVersioning {
    fn default() -> Self {
        Self {
            default: ApiVersion::V1,
            supported: vec![ApiVersion::V1, ApiVersion::V2],
        }
    }
}

impl ApiVersioning {
    /// Version requested by the `api-version` header, or the default.
    pub fn resolve(&self, headers: &HeaderMap) -> Result<ApiVersion, AppError> {
        let Some(raw) = headers.get(API_VERSION_HEADER) else {
            return Ok(self.default);
        };
        let raw = raw
            .to_str()
            .map_err(|_| AppError::BadRequest("api-version header is not valid ASCII".into()))?;
        let version: ApiVersion = raw.parse().map_err(AppError::BadRequest)?;

        if self.supported.contains(&version) {
            Ok(version)
        } else {
            Err(AppError::BadRequest(format!(
                "API version {version} is not supported (supported: {})",
                self.supported_list()
            )))
        }
    }

    pub fn supported_list(&self) -> String {
        self.supported
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Middleware that resolves the requested version into the request
/// extensions and reports the supported versions on the response.
pub async fn negotiate_version(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let mut response = match state.versioning.resolve(request.headers()) {
        Ok(version) => {
            request.extensions_mut().insert(version);
            next.run(request).await
        }
        Err(err) => ApiError(err).into_response(),
    };

    if let Ok(value) = HeaderValue::from_str(&state.versioning.supported_list()) {
        response
            .headers_mut()
            .insert(SUPPORTED_VERSIONS_HEADER, value);
    }
    response
}
