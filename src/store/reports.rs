use sqlx::SqlitePool;

use crate::models::Report;

use super::page_offset;

const REPORT_COLUMNS: &str = "id, start_date, end_date, total_tasks, completed_tasks, \
     overdue_tasks, created_at, owner_id";

pub async fn create(pool: &SqlitePool, report: &Report) -> Result<Report, sqlx::Error> {
    sqlx::query_as::<_, Report>(
        "INSERT INTO reports (id, start_date, end_date, total_tasks, completed_tasks, \
         overdue_tasks, created_at, owner_id)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING id, start_date, end_date, total_tasks, completed_tasks, \
         overdue_tasks, created_at, owner_id",
    )
    .bind(&report.id)
    .bind(report.start_date)
    .bind(report.end_date)
    .bind(report.total_tasks)
    .bind(report.completed_tasks)
    .bind(report.overdue_tasks)
    .bind(report.created_at)
    .bind(&report.owner_id)
    .fetch_one(pool)
    .await
}

pub async fn get_by_id(
    pool: &SqlitePool,
    id: &str,
    owner_id: &str,
) -> Result<Option<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        "SELECT {} FROM reports WHERE id = ? AND owner_id = ?",
        REPORT_COLUMNS
    ))
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await
}

pub async fn exists_by_id(pool: &SqlitePool, id: &str, owner_id: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM reports WHERE id = ? AND owner_id = ?)")
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
) -> Result<Vec<Report>, sqlx::Error> {
    sqlx::query_as::<_, Report>(&format!(
        "SELECT {} FROM reports WHERE owner_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
        REPORT_COLUMNS
    ))
    .bind(owner_id)
    .bind(limit as i64)
    .bind(page_offset(page, limit))
    .fetch_all(pool)
    .await
}

// Reports are snapshots; no update statement exists for them.

pub async fn delete(pool: &SqlitePool, id: &str, owner_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reports WHERE id = ? AND owner_id = ?")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
