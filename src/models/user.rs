use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

lazy_static! {
    // Letters and spaces with optional periods, e.g. "Dr. Alice B. Smith".
    static ref FULLNAME_REGEX: regex::Regex = regex::Regex::new(r"^[A-Za-z. ]{0,64}$").unwrap();
    // Alphanumeric and underscores only. The letter-plus-digit requirement
    // applies to passwords, not usernames.
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[A-Za-z0-9_]{3,30}$").unwrap();
    // Basic local@domain.tld shape.
    static ref EMAIL_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        let mut error = ValidationError::new("password");
        error.message = Some("Password must contain at least one letter and one digit".into());
        return Err(error);
    }
    Ok(())
}

/// Represents a user account as stored in the database.
///
/// The password hash never leaves the server: it is skipped during
/// serialization, so API responses built from this struct cannot leak it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: String,
    pub fullname: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload.
#[derive(Debug, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(regex(
        path = "FULLNAME_REGEX",
        message = "Fullname may contain letters, spaces and periods, up to 64 characters"
    ))]
    pub fullname: Option<String>,

    #[validate(regex(
        path = "USERNAME_REGEX",
        message = "Username must be 3 to 30 characters of letters, digits or underscores"
    ))]
    pub username: String,

    #[validate(
        length(min = 10, max = 128),
        regex(path = "EMAIL_REGEX", message = "Email must look like local@domain.tld")
    )]
    pub email: String,

    #[validate(length(min = 6, max = 32), custom = "validate_password")]
    pub password: String,
}

/// Partial-update payload for the authenticated user's own account.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(regex(
        path = "FULLNAME_REGEX",
        message = "Fullname may contain letters, spaces and periods, up to 64 characters"
    ))]
    pub fullname: Option<String>,

    #[validate(regex(
        path = "USERNAME_REGEX",
        message = "Username must be 3 to 30 characters of letters, digits or underscores"
    ))]
    pub username: Option<String>,

    #[validate(
        length(min = 10, max = 128),
        regex(path = "EMAIL_REGEX", message = "Email must look like local@domain.tld")
    )]
    pub email: Option<String>,
}

impl User {
    /// Creates a new account from a registration payload and an
    /// already-computed password hash. New accounts start active,
    /// unverified, and without elevated rights.
    pub fn new(input: UserCreate, hashed_password: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            fullname: input.fullname,
            username: input.username,
            email: input.email,
            hashed_password,
            is_active: true,
            is_verified: false,
            is_superuser: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update in place, advancing `updated_at`.
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(fullname) = update.fullname {
            self.fullname = Some(fullname);
        }
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> UserCreate {
        UserCreate {
            fullname: None,
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password: "pass123".to_string(),
        }
    }

    #[test]
    fn test_registration_validation() {
        assert!(registration().validate().is_ok());

        // Username without a digit is fine; the digit rule is for passwords.
        let mut input = registration();
        input.username = "al".to_string();
        assert!(input.validate().is_err());

        let mut input = registration();
        input.username = "has space".to_string();
        assert!(input.validate().is_err());

        let mut input = registration();
        input.email = "not-an-email".to_string();
        assert!(input.validate().is_err());

        // Below the 10-character floor even though the shape is right.
        let mut input = registration();
        input.email = "a@b.co".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_password_rules() {
        let mut input = registration();
        input.password = "short".to_string();
        assert!(input.validate().is_err());

        let mut input = registration();
        input.password = "lettersonly".to_string();
        assert!(input.validate().is_err());

        let mut input = registration();
        input.password = "12345678".to_string();
        assert!(input.validate().is_err());

        let mut input = registration();
        input.password = "a".repeat(33);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_fullname_rules() {
        let mut input = registration();
        input.fullname = Some("Dr. Alice B. Smith".to_string());
        assert!(input.validate().is_ok());

        let mut input = registration();
        input.fullname = Some("Alice123".to_string());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(registration(), "hash".to_string());
        assert!(user.is_active);
        assert!(!user.is_verified);
        assert!(!user.is_superuser);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(registration(), "supersecret".to_string());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("supersecret"));
        assert!(!json.contains("hashed_password"));
    }

    #[test]
    fn test_partial_update() {
        let mut user = User::new(registration(), "hash".to_string());
        user.apply(UserUpdate {
            fullname: Some("Alice Smith".to_string()),
            ..Default::default()
        });
        assert_eq!(user.fullname.as_deref(), Some("Alice Smith"));
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@x.com");
    }
}
