//! Output formatting driven by the `Accept` header: JSON or CSV, 406 otherwise.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use companies_core::AppError;

use crate::error::ApiError;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Csv,
}

impl ResponseFormat {
    fn for_media_type(media: &str) -> Option<Self> {
        match media {
            "*/*" | "application/*" | "application/json" => Some(Self::Json),
            "text/csv" | "text/*" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Pick the best format for the `Accept` header, honouring q-values.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let accept = match headers.get(header::ACCEPT).map(|v| v.to_str()) {
            None => return Ok(Self::Json),
            Some(Ok(accept)) if accept.trim().is_empty() => return Ok(Self::Json),
            Some(Ok(accept)) => accept,
            Some(Err(_)) => {
                return Err(AppError::BadRequest("Accept header is not valid ASCII".into()));
            }
        };

        let mut ranges: Vec<(String, f32)> = accept
            .split(',')
            .filter_map(|range| {
                let mut parts = range.split(';');
                let media = parts.next()?.trim().to_ascii_lowercase();
                let q = parts
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);
                (!media.is_empty() && q > 0.0).then_some((media, q))
            })
            .collect();
        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranges
            .iter()
            .find_map(|(media, _)| Self::for_media_type(media))
            .ok_or_else(|| {
                AppError::NotAcceptable(format!(
                    "cannot produce '{accept}'; supported: application/json, text/csv"
                ))
            })
    }

    /// Render a list of records.
    pub fn render<T: Serialize>(self, status: StatusCode, records: &[T]) -> Result<Response, ApiError> {
        match self {
            Self::Json => Ok((status, axum::Json(records)).into_response()),
            Self::Csv => Ok((
                status,
                [(header::CONTENT_TYPE, CSV_CONTENT_TYPE)],
                to_csv(records)?,
            )
                .into_response()),
        }
    }

    /// Render a single record (one CSV row under CSV).
    pub fn render_one<T: Serialize>(self, status: StatusCode, record: &T) -> Result<Response, ApiError> {
        match self {
            Self::Json => Ok((status, axum::Json(record)).into_response()),
            Self::Csv => self.render(status, std::slice::from_ref(record)),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ResponseFormat {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers)?)
    }
}

/// Serialize records as CSV with a header row taken from the field names.
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| AppError::Generic(format!("CSV serialization failed: {e}")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Generic(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Generic(format!("CSV is not UTF-8: {e}")))
}
