//! Session tokens.
//!
//! Sessions are HS256-signed JWTs carrying a [`Claims`] payload. They are
//! handed to the browser in an HTTP-only cookie; nothing is stored
//! server-side, so logging out only clears the cookie.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::User;

/// Default session lifetime in days.
pub const DEFAULT_TTL_DAYS: i64 = 7;

/// Longest session lifetime accepted from configuration.
pub const MAX_TTL_DAYS: i64 = 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user's id.
    pub sub: i64,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret used to sign and verify tokens.
    pub secret: String,
    pub ttl_days: i64,
    /// Adds `Secure` to the session cookie.
    pub secure_cookie: bool,
}

impl JwtConfig {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_days: DEFAULT_TTL_DAYS,
            secure_cookie: false,
        }
    }

    /// Reads `JWT_SECRET` (required), `JWT_TTL_DAYS` and `COOKIE_SECURE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::Config("JWT_SECRET must be set".to_string()))?;

        let ttl_days = match lookup("JWT_TTL_DAYS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|days| (1..=MAX_TTL_DAYS).contains(days))
                .ok_or_else(|| {
                    Error::Config(format!(
                        "JWT_TTL_DAYS must be between 1 and {MAX_TTL_DAYS}, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_TTL_DAYS,
        };

        let secure_cookie = lookup("COOKIE_SECURE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            secret,
            ttl_days,
            secure_cookie,
        })
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_days.saturating_mul(24 * 60 * 60)
    }
}

/// Signs a session token for `user`.
pub fn issue_token(user: &User, config: &JwtConfig) -> Result<String> {
    let now = Utc::now();
    let exp = Duration::try_days(config.ttl_days)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            Error::Config(format!(
                "session lifetime of {} days is out of range",
                config.ttl_days
            ))
        })?;

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.clone(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(token)
}

/// Checks the signature and expiry of `token` and returns its claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
