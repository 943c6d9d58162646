use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{SortOrder, Tag, Task, TaskSort, TaskStatus};

use super::page_offset;

const TASK_COLUMNS: &str =
    "id, title, description, status, priority, due_date, created_at, updated_at, owner_id";

pub async fn create(pool: &SqlitePool, task: &Task) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, title, description, status, priority, due_date, \
         created_at, updated_at, owner_id)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING id, title, description, status, priority, due_date, \
         created_at, updated_at, owner_id",
    )
    .bind(&task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(&task.status)
    .bind(&task.priority)
    .bind(task.due_date)
    .bind(task.created_at)
    .bind(task.updated_at)
    .bind(&task.owner_id)
    .fetch_one(pool)
    .await
}

pub async fn get_by_id(
    pool: &SqlitePool,
    id: &str,
    owner_id: &str,
) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = ? AND owner_id = ?",
        TASK_COLUMNS
    ))
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await
}

pub async fn exists_by_id(pool: &SqlitePool, id: &str, owner_id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ? AND owner_id = ?)")
        .bind(id)
        .bind(owner_id)
        .fetch_one(pool)
        .await
}

/// Lists one page of the owner's tasks. The sort expression comes from the
/// `TaskSort`/`SortOrder` enums, never from raw request strings.
pub async fn get_all(
    pool: &SqlitePool,
    owner_id: &str,
    page: u32,
    limit: u32,
    sort: TaskSort,
    order: SortOrder,
) -> Result<Vec<Task>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM tasks WHERE owner_id = ? ORDER BY {} {} LIMIT ? OFFSET ?",
        TASK_COLUMNS,
        sort.sql_expr(),
        order.sql_keyword()
    );

    sqlx::query_as::<_, Task>(&sql)
        .bind(owner_id)
        .bind(limit as i64)
        .bind(page_offset(page, limit))
        .fetch_all(pool)
        .await
}

pub async fn update(pool: &SqlitePool, task: &Task) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET title = ?, description = ?, status = ?, priority = ?, due_date = ?, updated_at = ?
         WHERE id = ? AND owner_id = ?
         RETURNING id, title, description, status, priority, due_date, \
         created_at, updated_at, owner_id",
    )
    .bind(&task.title)
    .bind(&task.description)
    .bind(&task.status)
    .bind(&task.priority)
    .bind(task.due_date)
    .bind(task.updated_at)
    .bind(&task.id)
    .bind(&task.owner_id)
    .fetch_one(pool)
    .await
}

/// Deleting a task cascades to its comments and tag links.
pub async fn delete(pool: &SqlitePool, id: &str, owner_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn add_tag(pool: &SqlitePool, task_id: &str, tag_id: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO task_tags (task_id, tag_id) VALUES (?, ?)")
        .bind(task_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn remove_tag(pool: &SqlitePool, task_id: &str, tag_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM task_tags WHERE task_id = ? AND tag_id = ?")
        .bind(task_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn tag_attached(
    pool: &SqlitePool,
    task_id: &str,
    tag_id: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM task_tags WHERE task_id = ? AND tag_id = ?)")
        .bind(task_id)
        .bind(tag_id)
        .fetch_one(pool)
        .await
}

pub async fn tags_of_task(pool: &SqlitePool, task_id: &str) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        "SELECT t.id, t.title, t.created_at, t.updated_at, t.owner_id
         FROM tags t
         JOIN task_tags tt ON tt.tag_id = t.id
         WHERE tt.task_id = ?
         ORDER BY t.created_at",
    )
    .bind(task_id)
    .fetch_all(pool)
    .await
}

/// Counts the owner's tasks created inside `[start, end]`, optionally
/// narrowed to one status. Report snapshots are built from three of these.
pub async fn count_by_status(
    pool: &SqlitePool,
    owner_id: &str,
    status: Option<&TaskStatus>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    match status {
        Some(status) => {
            sqlx::query_scalar(
                "SELECT COUNT(*) FROM tasks
                 WHERE owner_id = ? AND status = ? AND created_at >= ? AND created_at <= ?",
            )
            .bind(owner_id)
            .bind(status)
            .bind(start)
            .bind(end)
            .fetch_one(pool)
            .await
        }
        None => {
            sqlx::query_scalar(
                "SELECT COUNT(*) FROM tasks
                 WHERE owner_id = ? AND created_at >= ? AND created_at <= ?",
            )
            .bind(owner_id)
            .bind(start)
            .bind(end)
            .fetch_one(pool)
            .await
        }
    }
}
