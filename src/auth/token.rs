use crate::config::AuthConfig;
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's username.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Generates the short-lived token presented on every request.
/// Expiry is now plus the configured number of minutes.
pub fn issue_access_token(username: &str, auth: &AuthConfig) -> Result<String, AppError> {
    issue_token(
        username,
        Duration::minutes(auth.access_token_expire_minutes),
        auth,
    )
}

/// Generates the long-lived token used only to mint new access tokens.
/// Expiry is now plus the configured number of days; intended for cookie
/// storage, not the Authorization header.
pub fn issue_refresh_token(username: &str, auth: &AuthConfig) -> Result<String, AppError> {
    issue_token(username, Duration::days(auth.refresh_token_expire_days), auth)
}

fn issue_token(username: &str, lifetime: Duration, auth: &AuthConfig) -> Result<String, AppError> {
    let expiration = Utc::now()
        .checked_add_signed(lifetime)
        .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: username.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.secret_key.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a token's signature and expiry and returns its claims.
///
/// Malformed, expired, wrong-key, and subject-less tokens all fail with the
/// same `Unauthorized` error; callers are given no way to tell which it was.
pub fn verify_token(token: &str, auth: &AuthConfig) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.secret_key.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid credentials".into()))?;

    if claims.sub.is_empty() {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    Ok(claims)
}
