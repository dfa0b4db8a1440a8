use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::AppError;

/// Claims carried by every bearer token this service issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User name of the authenticated caller.
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and validates HS256 bearer tokens for a single static secret.
///
/// A token is accepted only when the signature verifies against the key
/// derived from the secret's UTF-8 bytes, the issuer and audience match the
/// configured values, and the token has not expired. There is no clock
/// leeway.
#[derive(Clone)]
pub struct JwtAuth {
    issuer: String,
    audience: String,
    lifetime: Duration,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.valid_issuer]);
        validation.set_audience(&[&config.valid_audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            issuer: config.valid_issuer.clone(),
            audience: config.valid_audience.clone(),
            lifetime: Duration::minutes(config.expires_minutes),
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Create a token for `user_name` that expires after the configured lifetime.
    pub fn issue(&self, user_name: &str, roles: &[String]) -> Result<String, AppError> {
        self.issue_with_expiry(user_name, roles, Utc::now() + self.lifetime)
    }

    /// Create a token with an explicit expiry instant.
    pub fn issue_with_expiry(
        &self,
        user_name: &str,
        roles: &[String],
        expires_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_name.to_string(),
            roles: roles.to_vec(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Generic(format!("Failed to sign token: {e}")))
    }

    /// Validate a raw token (without the `Bearer ` prefix).
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "token expired",
                    ErrorKind::InvalidIssuer => "invalid issuer",
                    ErrorKind::InvalidAudience => "invalid audience",
                    ErrorKind::InvalidSignature => "invalid signature",
                    ErrorKind::InvalidAlgorithm => "unexpected signing algorithm",
                    ErrorKind::MissingRequiredClaim(_) => "missing required claim",
                    _ => "malformed token",
                };
                tracing::debug!("Token rejected: {e}");
                AppError::Unauthorized(reason.to_string())
            })
    }

    /// Token lifetime in seconds, as reported to clients.
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime.num_seconds()
    }
}
