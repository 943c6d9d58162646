use crate::{
    auth::{
        issue_access_token, issue_refresh_token, resolve_identity, LoginRequest, TokenPair,
    },
    config::{AuthConfig, Config},
    error::AppError,
    models::UserCreate,
    service,
};
use actix_web::cookie::{time::Duration, Cookie};
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

fn refresh_cookie(token: String, auth: &AuthConfig) -> Cookie<'static> {
    Cookie::build("refresh_token", token)
        .http_only(true)
        .max_age(Duration::days(auth.refresh_token_expire_days))
        .finish()
}

/// Register a new user
///
/// Creates a new user account. Username and email must be unused.
#[post("/register")]
pub async fn register(
    pool: web::Data<SqlitePool>,
    register_data: web::Json<UserCreate>,
) -> Result<impl Responder, AppError> {
    let user = service::users::register(&pool, register_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "detail": format!("User '{}' registered", user.username)
    })))
}

/// Login user
///
/// Authenticates a username/password pair and returns an access/refresh
/// token pair. The refresh token is additionally set as an http-only cookie.
#[post("/login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let user =
        service::users::authenticate(&pool, &login_data.username, &login_data.password).await?;

    let access_token = issue_access_token(&user.username, &config.auth)?;
    let refresh_token = issue_refresh_token(&user.username, &config.auth)?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(refresh_token.clone(), &config.auth))
        .json(TokenPair::bearer(access_token, refresh_token)))
}

/// Refresh the token pair
///
/// Reads the refresh token from its cookie, verifies it, and rotates both
/// tokens. The old refresh cookie is replaced by the new one.
#[post("/refresh")]
pub async fn refresh(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let token = req
        .cookie("refresh_token")
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Refresh token is not provided".into()))?;

    // The subject must still name a real account.
    let user = resolve_identity(&pool, &config.auth, &token).await?;

    let access_token = issue_access_token(&user.username, &config.auth)?;
    let refresh_token = issue_refresh_token(&user.username, &config.auth)?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(refresh_token.clone(), &config.auth))
        .json(TokenPair::bearer(access_token, refresh_token)))
}
