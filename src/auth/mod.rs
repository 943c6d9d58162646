pub mod identity;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use identity::{bearer_token, resolve_active_identity, resolve_identity};
pub use password::{hash_password, verify_password};
pub use token::{issue_access_token, issue_refresh_token, verify_token, Claims};

/// Represents the payload for a user login request.
///
/// Only presence is checked here; whether the pair names a real account is
/// the authentication step's concern, and its failure is deliberately
/// indistinguishable from a wrong password.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Access/refresh token pair returned by the login and refresh operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl TokenPair {
    pub fn bearer(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        }
    }
}
