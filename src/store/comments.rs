use sqlx::SqlitePool;

use crate::models::Comment;

use super::page_offset;

const COMMENT_COLUMNS: &str = "id, comment, created_at, updated_at, owner_id, task_id";

pub async fn create(pool: &SqlitePool, comment: &Comment) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (id, comment, created_at, updated_at, owner_id, task_id)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING id, comment, created_at, updated_at, owner_id, task_id",
    )
    .bind(&comment.id)
    .bind(&comment.comment)
    .bind(comment.created_at)
    .bind(comment.updated_at)
    .bind(&comment.owner_id)
    .bind(&comment.task_id)
    .fetch_one(pool)
    .await
}

pub async fn get_by_id(
    pool: &SqlitePool,
    id: &str,
    owner_id: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        "SELECT {} FROM comments WHERE id = ? AND owner_id = ?",
        COMMENT_COLUMNS
    ))
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await
}

pub async fn exists_by_id(pool: &SqlitePool, id: &str, owner_id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM comments WHERE id = ? AND owner_id = ?)")
        .bind(id)
        .bind(owner_id)
        .fetch_one(pool)
        .await
}

/// One page of a task's comments, oldest first.
pub async fn get_all_by_task(
    pool: &SqlitePool,
    task_id: &str,
    owner_id: &str,
    page: u32,
    limit: u32,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        "SELECT {} FROM comments WHERE task_id = ? AND owner_id = ? \
         ORDER BY created_at LIMIT ? OFFSET ?",
        COMMENT_COLUMNS
    ))
    .bind(task_id)
    .bind(owner_id)
    .bind(limit as i64)
    .bind(page_offset(page, limit))
    .fetch_all(pool)
    .await
}

pub async fn update(pool: &SqlitePool, comment: &Comment) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "UPDATE comments
         SET comment = ?, updated_at = ?
         WHERE id = ? AND owner_id = ?
         RETURNING id, comment, created_at, updated_at, owner_id, task_id",
    )
    .bind(&comment.comment)
    .bind(comment.updated_at)
    .bind(&comment.id)
    .bind(&comment.owner_id)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: &str, owner_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
