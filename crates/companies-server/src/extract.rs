//! Request extractors: JSON bodies with `ErrorResponse` rejections, optionally validated.

use std::fmt::Display;

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use companies_core::AppError;

use crate::error::ApiError;

/// Field-level rules for an incoming payload.
pub trait Validate {
    fn validate(&self, violations: &mut Violations);

    /// Run the rules and return every violation as `field: message`.
    fn check(&self) -> Result<(), Vec<String>> {
        let mut violations = Violations::default();
        self.validate(&mut violations);
        violations.into_result()
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self, violations: &mut Violations) {
        violations.nested("", self.iter());
    }
}

/// Accumulates rule violations, prefixing nested fields with their path.
#[derive(Debug, Default)]
pub struct Violations {
    prefix: String,
    messages: Vec<String>,
}

impl Violations {
    pub fn push(&mut self, field: &str, message: impl Display) {
        self.messages
            .push(format!("{}{field}: {message}", self.prefix));
    }

    pub fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    pub fn required_max(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        } else if value.chars().count() > max {
            self.push(field, format!("maximum length is {max} characters"));
        }
    }

    /// Length limit for an optional field.
    pub fn max(&mut self, field: &str, value: Option<&str>, max: usize) {
        if value.is_some_and(|v| v.chars().count() > max) {
            self.push(field, format!("maximum length is {max} characters"));
        }
    }

    /// Validate each item of a nested collection under `field[i].`.
    pub fn nested<'a, T: Validate + 'a>(
        &mut self,
        field: &str,
        items: impl IntoIterator<Item = &'a T>,
    ) {
        for (i, item) in items.into_iter().enumerate() {
            let mut child = Violations {
                prefix: format!("{}{field}[{i}].", self.prefix),
                messages: Vec::new(),
            };
            item.validate(&mut child);
            self.messages.append(&mut child.messages);
        }
    }

    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(self.messages)
        }
    }
}

/// JSON body that must deserialize, 400 otherwise.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// JSON body that must deserialize (400 otherwise) and pass [`Validate`] (422 otherwise).
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        value
            .check()
            .map_err(|violations| AppError::Validation(violations.join("; ")))?;

        Ok(Self(value))
    }
}
