//! Request-identity resolution.
//!
//! Instead of a middleware pipeline, every use case resolves its caller
//! explicitly: extract the bearer token, verify it, and load the user the
//! subject claim names. Two levels exist: any authenticated user for reads,
//! an active authenticated user for writes.

use actix_web::HttpRequest;
use sqlx::SqlitePool;

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::models::User;
use crate::store;

use super::token::verify_token;

/// Pulls the bearer token out of the `Authorization` header.
pub fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing token".into()))
}

/// Resolves a verified token to the user it names.
///
/// A token whose subject no longer exists fails exactly like a bad token.
pub async fn resolve_identity(
    pool: &SqlitePool,
    auth: &AuthConfig,
    token: &str,
) -> Result<User, AppError> {
    let claims = verify_token(token, auth)?;
    store::users::get_by_username(pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))
}

/// Like [`resolve_identity`], but additionally rejects disabled accounts.
/// Required on every mutating path.
pub async fn resolve_active_identity(
    pool: &SqlitePool,
    auth: &AuthConfig,
    token: &str,
) -> Result<User, AppError> {
    let user = resolve_identity(pool, auth, token).await?;
    if !user.is_active {
        return Err(AppError::Forbidden("Account is inactive".into()));
    }
    Ok(user)
}
