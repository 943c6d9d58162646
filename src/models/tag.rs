use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn validate_tag_title(title: &str) -> Result<(), ValidationError> {
    let length = title.trim().chars().count();
    if !(2..=10).contains(&length) {
        let mut error = ValidationError::new("length");
        error.message = Some("Title length must be between 2 and 10 characters".into());
        return Err(error);
    }
    Ok(())
}

/// A user-owned label that can be attached to any number of the same
/// owner's tasks.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Tag {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TagInput {
    #[validate(custom = "validate_tag_title")]
    pub title: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct TagUpdate {
    #[validate(custom = "validate_tag_title")]
    pub title: Option<String>,
}

impl Tag {
    pub fn new(input: TagInput, owner_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            created_at: now,
            updated_at: now,
            owner_id: owner_id.to_string(),
        }
    }

    pub fn apply(&mut self, update: TagUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_title_bounds() {
        let short = TagInput {
            title: "a".to_string(),
        };
        assert!(short.validate().is_err());

        let fits = TagInput {
            title: "urgent".to_string(),
        };
        assert!(fits.validate().is_ok());

        let long = TagInput {
            title: "a".repeat(11),
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_tag_update_merge() {
        let mut tag = Tag::new(
            TagInput {
                title: "home".to_string(),
            },
            "user-1",
        );
        tag.apply(TagUpdate { title: None });
        assert_eq!(tag.title, "home");

        tag.apply(TagUpdate {
            title: Some("work".to_string()),
        });
        assert_eq!(tag.title, "work");
    }
}
