use sqlx::SqlitePool;

use crate::models::User;

const USER_COLUMNS: &str = "id, fullname, username, email, hashed_password, \
     is_active, is_verified, is_superuser, created_at, updated_at";

pub async fn create(pool: &SqlitePool, user: &User) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (id, fullname, username, email, hashed_password, \
         is_active, is_verified, is_superuser, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING id, fullname, username, email, hashed_password, \
         is_active, is_verified, is_superuser, created_at, updated_at",
    )
    .bind(&user.id)
    .bind(&user.fullname)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.hashed_password)
    .bind(user.is_active)
    .bind(user.is_verified)
    .bind(user.is_superuser)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(pool)
    .await
}

/// Unscoped lookup: users have no owner above them.
pub async fn get_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE username = ?",
        USER_COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn get_all(
    pool: &SqlitePool,
    page: u32,
    limit: u32,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users ORDER BY created_at DESC LIMIT ? OFFSET ?",
        USER_COLUMNS
    ))
    .bind(limit as i64)
    .bind(super::page_offset(page, limit))
    .fetch_all(pool)
    .await
}

pub async fn exists_by_username(pool: &SqlitePool, username: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
        .bind(username)
        .fetch_one(pool)
        .await
}

pub async fn exists_by_email(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
        .bind(email)
        .fetch_one(pool)
        .await
}

/// Writes back the full merged row. Callers merge partial updates into a
/// loaded `User` first, so absent fields keep their stored values.
pub async fn update(pool: &SqlitePool, user: &User) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users
         SET fullname = ?, username = ?, email = ?, updated_at = ?
         WHERE id = ?
         RETURNING id, fullname, username, email, hashed_password, \
         is_active, is_verified, is_superuser, created_at, updated_at",
    )
    .bind(&user.fullname)
    .bind(&user.username)
    .bind(&user.email)
    .bind(user.updated_at)
    .bind(&user.id)
    .fetch_one(pool)
    .await
}

/// Deleting a user cascades to every task, tag, comment, and report they own.
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
