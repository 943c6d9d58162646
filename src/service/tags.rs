use sqlx::SqlitePool;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Tag, TagInput, TagUpdate, User};
use crate::store;

pub async fn create(pool: &SqlitePool, actor: &User, data: TagInput) -> Result<Tag, AppError> {
    data.validate()?;
    let tag = Tag::new(data, &actor.id);
    Ok(store::tags::create(pool, &tag).await?)
}

pub async fn get(pool: &SqlitePool, actor: &User, id: &str) -> Result<Tag, AppError> {
    store::tags::get_by_id(pool, id, &actor.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tag not found".into()))
}

pub async fn list(
    pool: &SqlitePool,
    actor: &User,
    page: u32,
    limit: u32,
) -> Result<Vec<Tag>, AppError> {
    Ok(store::tags::get_all(pool, &actor.id, page, limit).await?)
}

pub async fn update(
    pool: &SqlitePool,
    actor: &User,
    id: &str,
    data: TagUpdate,
) -> Result<Tag, AppError> {
    data.validate()?;

    let mut tag = get(pool, actor, id).await?;
    tag.apply(data);

    Ok(store::tags::update(pool, &tag).await?)
}

pub async fn delete(pool: &SqlitePool, actor: &User, id: &str) -> Result<(), AppError> {
    if !store::tags::exists_by_id(pool, id, &actor.id).await? {
        return Err(AppError::NotFound("Tag not found".into()));
    }
    store::tags::delete(pool, id, &actor.id).await?;
    Ok(())
}
