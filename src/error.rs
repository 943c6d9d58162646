//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! various error conditions that can occur, from database issues to validation failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly convert
//! application errors into appropriate HTTP responses with JSON bodies of the shape
//! `{"detail": <reason>}`. It also provides `From` trait implementations for common
//! error types like `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError`, allowing for easy
//! conversion using the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to a specific type of error, carrying a message
/// detailing the issue. These errors are then converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Represents a failed or missing authentication (HTTP 401).
    /// Invalid, expired, and malformed credentials all surface through this variant
    /// with an identical message, so callers cannot distinguish the failure mode.
    Unauthorized(String),
    /// Represents a valid identity that is not allowed to act (HTTP 403).
    /// Used for disabled accounts attempting a write.
    Forbidden(String),
    /// Represents a client-side error due to a malformed or invalid payload (HTTP 400).
    /// All field-validation failures collapse into this variant.
    BadRequest(String),
    /// Represents a situation where a requested resource was not found (HTTP 404).
    /// Also returned when a resource exists but belongs to another owner.
    NotFound(String),
    /// Represents a uniqueness or idempotency violation (HTTP 409).
    Conflict(String),
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Represents an error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate.
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON error responses.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "detail": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "detail": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "detail": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "detail": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "detail": msg
            })),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "detail": msg
            })),
            // Database errors are also presented as generic internal server errors to the client.
            AppError::DatabaseError(msg) => HttpResponse::InternalServerError().json(json!({
                "detail": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// Specific cases like `sqlx::Error::RowNotFound` are mapped to `AppError::NotFound`,
/// while other database errors become `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::BadRequest`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::BadRequest(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
///
/// Every token failure mode collapses into the same uniform message.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized("Invalid credentials".into())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
///
/// This handles errors during password hashing or verification.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        // Test Unauthorized
        let error = AppError::Unauthorized("Invalid credentials".into());
        let response = error.error_response();
        assert_eq!(response.status(), 401);

        // Test Forbidden
        let error = AppError::Forbidden("Account is inactive".into());
        let response = error.error_response();
        assert_eq!(response.status(), 403);

        // Test BadRequest
        let error = AppError::BadRequest("Invalid input".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        // Test NotFound
        let error = AppError::NotFound("Resource not found".into());
        let response = error.error_response();
        assert_eq!(response.status(), 404);

        // Test Conflict
        let error = AppError::Conflict("Username already taken".into());
        let response = error.error_response();
        assert_eq!(response.status(), 409);

        // Test InternalServerError
        let error = AppError::InternalServerError("Server error".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(error.error_response().status(), 404);
    }

    #[test]
    fn test_token_errors_are_uniform() {
        use jsonwebtoken::errors::ErrorKind;

        let expired: AppError =
            jsonwebtoken::errors::Error::from(ErrorKind::ExpiredSignature).into();
        let garbled: AppError = jsonwebtoken::errors::Error::from(ErrorKind::InvalidToken).into();

        // Both failure modes must produce the same status and the same message.
        assert_eq!(expired.error_response().status(), 401);
        assert_eq!(garbled.error_response().status(), 401);
        assert_eq!(expired.to_string(), garbled.to_string());
    }
}
