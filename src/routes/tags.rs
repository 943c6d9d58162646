use crate::{
    auth::{bearer_token, resolve_active_identity, resolve_identity},
    config::Config,
    error::AppError,
    models::{PageQuery, TagInput, TagUpdate},
    service,
};
use actix_web::{delete, get, patch, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;

const DEFAULT_LIMIT: u32 = 5;

#[get("")]
pub async fn get_tags(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query_params: web::Query<PageQuery>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_identity(&pool, &config.auth, bearer_token(&req)?).await?;
    let (page, limit) = query_params.resolve(DEFAULT_LIMIT);

    let tags = service::tags::list(&pool, &actor, page, limit).await?;

    Ok(HttpResponse::Ok().json(tags))
}

#[post("")]
pub async fn create_tag(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    tag_data: web::Json<TagInput>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let tag = service::tags::create(&pool, &actor, tag_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(tag))
}

#[get("/{id}")]
pub async fn get_tag(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    tag_id: web::Path<String>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let tag = service::tags::get(&pool, &actor, &tag_id).await?;

    Ok(HttpResponse::Ok().json(tag))
}

#[patch("/{id}")]
pub async fn update_tag(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    tag_id: web::Path<String>,
    tag_data: web::Json<TagUpdate>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let tag = service::tags::update(&pool, &actor, &tag_id, tag_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(tag))
}

#[delete("/{id}")]
pub async fn delete_tag(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    tag_id: web::Path<String>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    service::tags::delete(&pool, &actor, &tag_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "detail": "Tag deleted" })))
}
