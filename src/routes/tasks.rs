use crate::{
    auth::{bearer_token, resolve_active_identity, resolve_identity},
    config::Config,
    error::AppError,
    models::{SortOrder, TaskInput, TaskSort, TaskUpdate},
    service,
};
use actix_web::{delete, get, patch, post, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;

const DEFAULT_LIMIT: u32 = 10;

/// Query parameters accepted when listing tasks.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    /// 1-indexed page, defaults to 1.
    pub page: Option<u32>,
    /// Page size, defaults to 10.
    pub limit: Option<u32>,
    /// Sort key: `priority`, `created_at`, or `status`. Defaults to `created_at`.
    pub sort_by: Option<TaskSort>,
    /// Sort direction: `asc` or `desc`. Defaults to `desc`.
    pub order: Option<SortOrder>,
}

/// Retrieves a page of the authenticated user's tasks.
///
/// Only tasks owned by the caller are visible. `priority` sorts by the
/// ordinal low < medium < high rather than alphabetically.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("")]
pub async fn get_tasks(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query_params: web::Query<TaskListQuery>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let page = query_params.page.unwrap_or(1).max(1);
    let limit = query_params.limit.unwrap_or(DEFAULT_LIMIT);
    let sort = query_params.sort_by.unwrap_or(TaskSort::CreatedAt);
    let order = query_params.order.unwrap_or(SortOrder::Desc);

    let tasks = service::tasks::list(&pool, &actor, page, limit, sort, order).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// A JSON object matching `TaskInput`:
/// - `title`: 3 to 30 characters after trimming (required).
/// - `description` (optional): up to 200 characters after trimming.
/// - `priority` (optional): `low`, `medium`, or `high`; defaults to `low`.
/// - `due_date` (optional): must lie strictly in the future.
///
/// Status is not accepted on creation; every task starts as `ongoing`.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `400 Bad Request`: If a field fails validation.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the account has been disabled.
#[post("")]
pub async fn create_task(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    task_data: web::Json<TaskInput>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let task = service::tasks::create(&pool, &actor, task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a single task by id. A task owned by another user yields the
/// same `404` as a task that does not exist.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    task_id: web::Path<String>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let task = service::tasks::get(&pool, &actor, &task_id).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task. Only fields present in the payload change;
/// everything else keeps its stored value.
#[patch("/{id}")]
pub async fn update_task(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    task_id: web::Path<String>,
    task_data: web::Json<TaskUpdate>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let task = service::tasks::update(&pool, &actor, &task_id, task_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task together with its comments and tag links.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    task_id: web::Path<String>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    service::tasks::delete(&pool, &actor, &task_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "detail": "Task deleted" })))
}

/// Lists the tags attached to a task.
#[get("/{id}/tags")]
pub async fn get_task_tags(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    task_id: web::Path<String>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let tags = service::tasks::list_tags(&pool, &actor, &task_id).await?;

    Ok(HttpResponse::Ok().json(tags))
}

/// Attaches a tag to a task. Both must belong to the caller.
///
/// ## Responses:
/// - `201 Created`: The tag is now attached.
/// - `404 Not Found`: Task or tag missing, or owned by someone else.
/// - `409 Conflict`: The tag is already attached.
#[post("/{id}/tags/{tag_id}")]
pub async fn attach_tag(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    path: web::Path<(String, String)>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;
    let (task_id, tag_id) = path.into_inner();

    service::tasks::attach_tag(&pool, &actor, &task_id, &tag_id).await?;

    Ok(HttpResponse::Created().json(json!({ "detail": "Tag attached" })))
}

/// Detaches a tag from a task. Detaching a tag that is not attached yields
/// `404`, mirroring the attach conflict.
#[delete("/{id}/tags/{tag_id}")]
pub async fn detach_tag(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    path: web::Path<(String, String)>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;
    let (task_id, tag_id) = path.into_inner();

    service::tasks::detach_tag(&pool, &actor, &task_id, &tag_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "detail": "Tag detached" })))
}
