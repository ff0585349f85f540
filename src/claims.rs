//! Claims payload shaped like a Sign in with Apple identity token.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{config::Config, error::ValidationError};

/// Distance between `iat` and `exp`: 100,000,000 seconds (about 3.17 years).
pub const EXPIRATION_OFFSET_SECS: i64 = 100_000_000;

/// Apple sends `email_verified` as a string rather than a boolean.
pub const EMAIL_VERIFIED: &str = "true";

/// Error codes the provider may place in the `err` claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    InvalidClient,
    InvalidGrant,
    UnauthorizedClient,
    UnsupportedGrantType,
    InvalidScope,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::InvalidRequest,
        ErrorCode::InvalidClient,
        ErrorCode::InvalidGrant,
        ErrorCode::UnauthorizedClient,
        ErrorCode::UnsupportedGrantType,
        ErrorCode::InvalidScope,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "invalid_request",
            ErrorCode::InvalidClient => "invalid_client",
            ErrorCode::InvalidGrant => "invalid_grant",
            ErrorCode::UnauthorizedClient => "unauthorized_client",
            ErrorCode::UnsupportedGrantType => "unsupported_grant_type",
            ErrorCode::InvalidScope => "invalid_scope",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidErrorCode {
                value: s.to_string(),
            })
    }
}

/// The token payload. Field order matches what the provider emits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,

    /// Simulated provider-side error, absent unless requested.
    #[serde(rename = "err", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,

    pub email_verified: String,
    pub nonce_supported: bool,

    #[serde(rename = "iss")]
    pub issuer: String,

    #[serde(rename = "sub")]
    pub subject: String,

    /// Always a single entry, serialized as an array.
    #[serde(rename = "aud")]
    pub audience: Vec<String>,

    /// Seconds since the epoch.
    #[serde(rename = "exp")]
    pub expires_at: i64,

    /// Seconds since the epoch.
    #[serde(rename = "iat")]
    pub issued_at: i64,
}

/// Builds [`Claims`] from a [`Config`].
#[derive(Clone, Copy, Debug)]
pub struct ClaimsBuilder<'a> {
    config: &'a Config,
}

impl<'a> ClaimsBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Build a payload issued now.
    pub fn build(&self) -> Result<Claims, ValidationError> {
        self.build_at(Utc::now())
    }

    /// Build a payload issued at `now`.
    pub fn build_at(&self, now: DateTime<Utc>) -> Result<Claims, ValidationError> {
        let config = self.config;

        // An empty string means no error claim was requested.
        let error = match config.error.as_str() {
            "" => None,
            value => Some(value.parse::<ErrorCode>()?),
        };

        let issued_at = now.timestamp();
        let expires_at = if config.expired {
            issued_at - EXPIRATION_OFFSET_SECS
        } else {
            issued_at + EXPIRATION_OFFSET_SECS
        };

        debug!(
            issued_at,
            expires_at,
            expired = config.expired,
            error = error.map(|code| code.as_str()),
            "Built claims."
        );

        Ok(Claims {
            email: config.email.clone(),
            error,
            email_verified: EMAIL_VERIFIED.to_string(),
            nonce_supported: true,
            issuer: config.issuer.clone(),
            subject: config.subject.clone(),
            audience: vec![config.audience.clone()],
            expires_at,
            issued_at,
        })
    }
}
