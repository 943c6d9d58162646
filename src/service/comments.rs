use sqlx::SqlitePool;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Comment, CommentInput, CommentUpdate, User};
use crate::store;

/// Comments attach only to the caller's own tasks; someone else's task
/// reads as absent here like everywhere else.
pub async fn create(
    pool: &SqlitePool,
    actor: &User,
    task_id: &str,
    data: CommentInput,
) -> Result<Comment, AppError> {
    data.validate()?;

    if !store::tasks::exists_by_id(pool, task_id, &actor.id).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }

    let comment = Comment::new(data, &actor.id, task_id);
    Ok(store::comments::create(pool, &comment).await?)
}

pub async fn list(
    pool: &SqlitePool,
    actor: &User,
    task_id: &str,
    page: u32,
    limit: u32,
) -> Result<Vec<Comment>, AppError> {
    if !store::tasks::exists_by_id(pool, task_id, &actor.id).await? {
        return Err(AppError::NotFound("Task not found".into()));
    }
    Ok(store::comments::get_all_by_task(pool, task_id, &actor.id, page, limit).await?)
}

pub async fn update(
    pool: &SqlitePool,
    actor: &User,
    id: &str,
    data: CommentUpdate,
) -> Result<Comment, AppError> {
    data.validate()?;

    let mut comment = store::comments::get_by_id(pool, id, &actor.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;
    comment.apply(data);

    Ok(store::comments::update(pool, &comment).await?)
}

pub async fn delete(pool: &SqlitePool, actor: &User, id: &str) -> Result<(), AppError> {
    if !store::comments::exists_by_id(pool, id, &actor.id).await? {
        return Err(AppError::NotFound("Comment not found".into()));
    }
    store::comments::delete(pool, id, &actor.id).await?;
    Ok(())
}
