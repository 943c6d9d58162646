use crate::{
    auth::{bearer_token, resolve_active_identity, resolve_identity},
    config::Config,
    error::AppError,
    models::UserUpdate,
    service,
};
use actix_web::{delete, get, patch, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;

/// Returns the authenticated user's own account. The password hash is
/// never part of the serialized form.
#[get("/me")]
pub async fn me(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    Ok(HttpResponse::Ok().json(actor))
}

/// Partially updates the authenticated user's own account.
#[patch("/me")]
pub async fn update_me(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    user_data: web::Json<UserUpdate>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    let user = service::users::update_account(&pool, &actor, user_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Deletes the authenticated user's account and everything it owns.
#[delete("/me")]
pub async fn delete_me(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let actor = resolve_active_identity(&pool, &config.auth, bearer_token(&req)?).await?;

    service::users::delete_account(&pool, &actor).await?;

    Ok(HttpResponse::Ok().json(json!({
        "detail": format!("User '{}' deleted", actor.username)
    })))
}
