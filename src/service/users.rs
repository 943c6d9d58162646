use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::{User, UserCreate, UserUpdate};
use crate::store;

/// Registers a new account. Username and email are globally unique; the
/// probes run before the insert so callers see a conflict, not a driver
/// error from the unique index.
pub async fn register(pool: &SqlitePool, data: UserCreate) -> Result<User, AppError> {
    data.validate()?;

    if store::users::exists_by_username(pool, &data.username).await? {
        return Err(AppError::Conflict("Username already taken".into()));
    }
    if store::users::exists_by_email(pool, &data.email).await? {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hashed_password = hash_password(&data.password)?;
    let user = User::new(data, hashed_password);

    Ok(store::users::create(pool, &user).await?)
}

/// Checks a username/password pair. An unknown username and a wrong
/// password fail identically.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let user = store::users::get_by_username(pool, username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    if !verify_password(password, &user.hashed_password)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    Ok(user)
}

/// Applies a partial update to the caller's own account.
pub async fn update_account(
    pool: &SqlitePool,
    actor: &User,
    data: UserUpdate,
) -> Result<User, AppError> {
    data.validate()?;

    if let Some(username) = &data.username {
        if username != &actor.username && store::users::exists_by_username(pool, username).await? {
            return Err(AppError::Conflict("Username already taken".into()));
        }
    }
    if let Some(email) = &data.email {
        if email != &actor.email && store::users::exists_by_email(pool, email).await? {
            return Err(AppError::Conflict("Email already registered".into()));
        }
    }

    let mut user = actor.clone();
    user.apply(data);

    Ok(store::users::update(pool, &user).await?)
}

/// Deletes the caller's own account and everything it owns.
pub async fn delete_account(pool: &SqlitePool, actor: &User) -> Result<(), AppError> {
    if store::users::delete(pool, &actor.id).await? == 0 {
        return Err(AppError::NotFound("User not found".into()));
    }
    Ok(())
}
