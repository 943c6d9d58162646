use crate::{
    auth::{bearer_token, resolve_active_identity, resolve_identity},
    config::Config,
    error::AppError,
    models::{PageQuery, ReportInput},
    service,
};
use actix_web::{delete, get, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;

const DEFAULT_LIMIT: u32 = 5;

/// Computes and stores a snapshot of the caller's task counts over a date
/// range. Reports are immutable; there is no update endpoint.
#[post("")]
pub async fn create_report(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    report_data: web::Json<ReportInput>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let report = service::reports::create(&pool, &actor, report_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(report))
}

#[get("")]
pub async fn get_reports(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query_params: web::Query<PageQuery>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_identity(&pool, &config.auth, bearer_token(&req)?).await?;
    let (page, limit) = query_params.resolve(DEFAULT_LIMIT);

    let reports = service::reports::list(&pool, &actor, page, limit).await?;

    Ok(HttpResponse::Ok().json(reports))
}

#[get("/{id}")]
pub async fn get_report(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    report_id: web::Path<String>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let report = service::reports::get(&pool, &actor, &report_id).await?;

    Ok(HttpResponse::Ok().json(report))
}

#[delete("/{id}")]
pub async fn delete_report(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    report_id: web::Path<String>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    service::reports::delete(&pool, &actor, &report_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "detail": "Report deleted" })))
}
