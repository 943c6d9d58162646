use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn validate_comment(comment: &str) -> Result<(), ValidationError> {
    let length = comment.trim().chars().count();
    if !(1..=500).contains(&length) {
        let mut error = ValidationError::new("length");
        error.message = Some("Comment length must be between 1 and 500 characters".into());
        return Err(error);
    }
    Ok(())
}

/// A comment on one of the owner's tasks. Deleted together with the task.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    /// Unset until the comment is first edited.
    pub updated_at: Option<DateTime<Utc>>,
    pub owner_id: String,
    pub task_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentInput {
    #[validate(custom = "validate_comment")]
    pub comment: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CommentUpdate {
    #[validate(custom = "validate_comment")]
    pub comment: Option<String>,
}

impl Comment {
    pub fn new(input: CommentInput, owner_id: &str, task_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            comment: input.comment,
            created_at: Utc::now(),
            updated_at: None,
            owner_id: owner_id.to_string(),
            task_id: task_id.to_string(),
        }
    }

    pub fn apply(&mut self, update: CommentUpdate) {
        if let Some(comment) = update.comment {
            self.comment = comment;
        }
        self.updated_at = Some(Utc::now());
    }
}
