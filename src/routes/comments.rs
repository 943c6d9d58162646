use crate::{
    auth::{bearer_token, resolve_active_identity, resolve_identity},
    config::Config,
    error::AppError,
    models::{CommentInput, CommentUpdate, PageQuery},
    service,
};
use actix_web::{delete, get, patch, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;

const DEFAULT_LIMIT: u32 = 10;

/// Adds a comment to one of the caller's tasks.
/// Mounted under the `/tasks` scope.
#[post("/{task_id}/comments")]
pub async fn create_comment(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    task_id: web::Path<String>,
    comment_data: web::Json<CommentInput>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let comment =
        service::comments::create(&pool, &actor, &task_id, comment_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Lists a task's comments, oldest first.
/// Mounted under the `/tasks` scope.
#[get("/{task_id}/comments")]
pub async fn get_comments(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    task_id: web::Path<String>,
    query_params: web::Query<PageQuery>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_identity(&pool, &config.auth, bearer_token(&req)?).await?;
    let (page, limit) = query_params.resolve(DEFAULT_LIMIT);

    let comments = service::comments::list(&pool, &actor, &task_id, page, limit).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Edits a comment. The first edit sets `updated_at`.
#[patch("/{id}")]
pub async fn update_comment(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    comment_id: web::Path<String>,
    comment_data: web::Json<CommentUpdate>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let comment =
        service::comments::update(&pool, &actor, &comment_id, comment_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(comment))
}

#[delete("/{id}")]
pub async fn delete_comment(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    comment_id: web::Path<String>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    service::comments::delete(&pool, &actor, &comment_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "detail": "Comment deleted" })))
}
