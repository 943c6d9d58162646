use sqlx::SqlitePool;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Report, ReportInput, TaskStatus, User};
use crate::store;

/// Builds and persists a snapshot of the caller's task counts over the
/// given range. The stored numbers never change afterwards, whatever
/// happens to the tasks.
pub async fn create(pool: &SqlitePool, actor: &User, data: ReportInput) -> Result<Report, AppError> {
    data.validate()?;

    let total_tasks =
        store::tasks::count_by_status(pool, &actor.id, None, data.start_date, data.end_date)
            .await?;
    let completed_tasks = store::tasks::count_by_status(
        pool,
        &actor.id,
        Some(&TaskStatus::Completed),
        data.start_date,
        data.end_date,
    )
    .await?;
    let overdue_tasks = store::tasks::count_by_status(
        pool,
        &actor.id,
        Some(&TaskStatus::Overdue),
        data.start_date,
        data.end_date,
    )
    .await?;

    let report = Report::new(data, total_tasks, completed_tasks, overdue_tasks, &actor.id);
    Ok(store::reports::create(pool, &report).await?)
}

pub async fn get(pool: &SqlitePool, actor: &User, id: &str) -> Result<Report, AppError> {
    store::reports::get_by_id(pool, id, &actor.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Report not found".into()))
}

pub async fn list(
    pool: &SqlitePool,
    actor: &User,
    page: u32,
    limit: u32,
) -> Result<Vec<Report>, AppError> {
    Ok(store::reports::get_all(pool, &actor.id, page, limit).await?)
}

pub async fn delete(pool: &SqlitePool, actor: &User, id: &str) -> Result<(), AppError> {
    if !store::reports::exists_by_id(pool, id, &actor.id).await? {
        return Err(AppError::NotFound("Report not found".into()));
    }
    store::reports::delete(pool, id, &actor.id).await?;
    Ok(())
}
