use sqlx::SqlitePool;
use validator::Validate;

use crate::error::AppError;
use crate::models::{SortOrder, Tag, Task, TaskInput, TaskSort, TaskUpdate, User};
use crate::store;

pub async fn create(pool: &SqlitePool, actor: &User, data: TaskInput) -> Result<Task, AppError> {
    data.validate()?;
    let task = Task::new(data, &actor.id);
    Ok(store::tasks::create(pool, &task).await?)
}

/// Another owner's task reads as absent, never as forbidden.
pub async fn get(pool: &SqlitePool, actor: &User, id: &str) -> Result<Task, AppError> {
    store::tasks::get_by_id(pool, id, &actor.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))
}

pub async fn list(
    pool: &SqlitePool,
    actor: &User,
    page: u32,
    limit: u32,
    sort: TaskSort,
    order: SortOrder,
) -> Result<Vec<Task>, AppError> {
    Ok(store::tasks::get_all(pool, &actor.id, page, limit, sort, order).await?)
}

pub async fn update(
    pool: &SqlitePool,
    actor: &User,
    id: &str,
    data: TaskUpdate,
) -> Result<Task, AppError> {
    data.validate()?;

    let mut task = get(pool, actor, id).await?;
    task.apply(data);

    Ok(store::tasks::update(pool, &task).await?)
}

pub async fn delete(pool: &SqlitePool, actor: &User, id: &str) -> Result<(), AppError> {
    if !store::tasks::exists_by_id(pool, id, &actor.id).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }
    store::tasks::delete(pool, id, &actor.id).await?;
    Ok(())
}

/// Attaches one of the caller's tags to one of the caller's tasks.
///
/// The tag lookup is owner-scoped, so a tag belonging to someone else is
/// indistinguishable from a missing one.
pub async fn attach_tag(
    pool: &SqlitePool,
    actor: &User,
    task_id: &str,
    tag_id: &str,
) -> Result<(), AppError> {
    if !store::tasks::exists_by_id(pool, task_id, &actor.id).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }
    if !store::tags::exists_by_id(pool, tag_id, &actor.id).await? {
        return Err(AppError::NotFound("Tag not found".into()));
    }
    if store::tasks::tag_attached(pool, task_id, tag_id).await? {
        return Err(AppError::Conflict("Tag is already attached to this task".into()));
    }

    Ok(store::tasks::add_tag(pool, task_id, tag_id).await?)
}

pub async fn detach_tag(
    pool: &SqlitePool,
    actor: &User,
    task_id: &str,
    tag_id: &str,
) -> Result<(), AppError> {
    if !store::tasks::exists_by_id(pool, task_id, &actor.id).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }
    if !store::tags::exists_by_id(pool, tag_id, &actor.id).await? {
        return Err(AppError::NotFound("Tag not found".into()));
    }
    if !store::tasks::tag_attached(pool, task_id, tag_id).await? {
        return Err(AppError::NotFound("Tag is not attached to this task".into()));
    }

    store::tasks::remove_tag(pool, task_id, tag_id).await?;
    Ok(())
}

pub async fn list_tags(
    pool: &SqlitePool,
    actor: &User,
    task_id: &str,
) -> Result<Vec<Tag>, AppError> {
    if !store::tasks::exists_by_id(pool, task_id, &actor.id).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }
    Ok(store::tasks::tags_of_task(pool, task_id).await?)
}
