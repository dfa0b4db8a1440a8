use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

/// Environment variable holding the token signing secret.
pub const SECRET_VAR: &str = "SECRET";

const DEFAULT_EXPIRES_MINUTES: i64 = 60;

/// The `JwtSettings` section of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtSettings {
    pub valid_issuer: Option<String>,
    pub valid_audience: Option<String>,
    /// Token lifetime in minutes.
    pub expires: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(rename = "JwtSettings", default)]
    jwt_settings: JwtSettings,
}

impl JwtSettings {
    /// Read the `JwtSettings` section from a JSON settings file.
    ///
    /// A missing file yields empty settings so that environment variables
    /// alone can configure the service.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            tracing::debug!("Settings file {} not found, using environment only", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let file: SettingsFile = serde_json::from_str(&raw)?;
        Ok(file.jwt_settings)
    }
}

/// Resolved token configuration: issuer, audience, lifetime and secret.
#[derive(Clone)]
pub struct JwtConfig {
    pub valid_issuer: String,
    pub valid_audience: String,
    pub expires_minutes: i64,
    pub secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("valid_issuer", &self.valid_issuer)
            .field("valid_audience", &self.valid_audience)
            .field("expires_minutes", &self.expires_minutes)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl JwtConfig {
    /// Resolve configuration from the settings section and the process environment.
    ///
    /// - `SECRET` (required)
    /// - `JWT_VALID_ISSUER`, `JWT_VALID_AUDIENCE` (override the settings section)
    /// - `JWT_EXPIRES_MINUTES` (optional, defaults to the section value or 60)
    pub fn from_env(settings: JwtSettings) -> Result<Self, AppError> {
        Self::from_lookup(settings, |key| std::env::var(key).ok())
    }

    /// Same as [`JwtConfig::from_env`] but with an injectable variable lookup.
    pub fn from_lookup(
        settings: JwtSettings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let secret = non_empty(lookup(SECRET_VAR)).ok_or_else(|| {
            AppError::ConfigError(format!(
                "{SECRET_VAR} not set. Required to sign and validate bearer tokens."
            ))
        })?;

        let valid_issuer = non_empty(lookup("JWT_VALID_ISSUER"))
            .or_else(|| non_empty(settings.valid_issuer))
            .ok_or_else(|| {
                AppError::ConfigError(
                    "JwtSettings.validIssuer not set (or JWT_VALID_ISSUER)".into(),
                )
            })?;

        let valid_audience = non_empty(lookup("JWT_VALID_AUDIENCE"))
            .or_else(|| non_empty(settings.valid_audience))
            .ok_or_else(|| {
                AppError::ConfigError(
                    "JwtSettings.validAudience not set (or JWT_VALID_AUDIENCE)".into(),
                )
            })?;

        let expires_minutes = match lookup("JWT_EXPIRES_MINUTES") {
            Some(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid JWT_EXPIRES_MINUTES '{raw}': must be an integer"
                ))
            })?,
            None => settings.expires.unwrap_or(DEFAULT_EXPIRES_MINUTES),
        };
        if expires_minutes <= 0 {
            return Err(AppError::ConfigError(
                "Token lifetime must be at least 1 minute".into(),
            ));
        }

        Ok(Self {
            valid_issuer,
            valid_audience,
            expires_minutes,
            secret,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
