use sqlx::SqlitePool;

use crate::models::Tag;

use super::page_offset;

const TAG_COLUMNS: &str = "id, title, created_at, updated_at, owner_id";

pub async fn create(pool: &SqlitePool, tag: &Tag) -> Result<Tag, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        "INSERT INTO tags (id, title, created_at, updated_at, owner_id)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id, title, created_at, updated_at, owner_id",
    )
    .bind(&tag.id)
    .bind(&tag.title)
    .bind(tag.created_at)
    .bind(tag.updated_at)
    .bind(&tag.owner_id)
    .fetch_one(pool)
    .await
}

pub async fn get_by_id(
    pool: &SqlitePool,
    id: &str,
    owner_id: &str,
) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(&format!(
        "SELECT {} FROM tags WHERE id = ? AND owner_id = ?",
        TAG_COLUMNS
    ))
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await
}

pub async fn exists_by_id(pool: &SqlitePool, id: &str, owner_id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tags WHERE id = ? AND owner_id = ?)")
        .bind(id)
        .bind(owner_id)
        .fetch_one(pool)
        .await
}

pub async fn get_all(
    pool: &SqlitePool,
    owner_id: &str,
    page: u32,
    limit: u32,
) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(&format!(
        "SELECT {} FROM tags WHERE owner_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
        TAG_COLUMNS
    ))
    .bind(owner_id)
    .bind(limit as i64)
    .bind(page_offset(page, limit))
    .fetch_all(pool)
    .await
}

pub async fn update(pool: &SqlitePool, tag: &Tag) -> Result<Tag, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        "UPDATE tags
         SET title = ?, updated_at = ?
         WHERE id = ? AND owner_id = ?
         RETURNING id, title, created_at, updated_at, owner_id",
    )
    .bind(&tag.title)
    .bind(tag.updated_at)
    .bind(&tag.id)
    .bind(&tag.owner_id)
    .fetch_one(pool)
    .await
}

/// Deleting a tag cascades to its task links, never to the tasks themselves.
pub async fn delete(pool: &SqlitePool, id: &str, owner_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
