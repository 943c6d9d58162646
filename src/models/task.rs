use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Represents the priority of a task.
/// Stored as lowercase text in the `tasks.priority` column.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

/// Represents the status of a task.
/// Stored as lowercase text in the `tasks.status` column.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is still being worked on. Every task starts here.
    Ongoing,
    /// Task is finished.
    Completed,
    /// Task missed its due date.
    Overdue,
}

/// Sort keys accepted when listing tasks.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSort {
    Priority,
    CreatedAt,
    Status,
}

impl TaskSort {
    /// The ORDER BY expression for this key. Priority sorts by its ordinal
    /// (low < medium < high), not by the stored text.
    pub fn sql_expr(&self) -> &'static str {
        match self {
            TaskSort::Priority => {
                "CASE priority WHEN 'low' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END"
            }
            TaskSort::CreatedAt => "created_at",
            TaskSort::Status => "status",
        }
    }
}

/// Sort direction accepted when listing tasks.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let length = title.trim().chars().count();
    if !(3..=30).contains(&length) {
        let mut error = ValidationError::new("length");
        error.message = Some("Title length must be between 3 and 30 characters".into());
        return Err(error);
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().chars().count() > 200 {
        let mut error = ValidationError::new("length");
        error.message = Some("Description length must be between 0 and 200 characters".into());
        return Err(error);
    }
    Ok(())
}

fn validate_due_date(due_date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *due_date <= Utc::now() {
        let mut error = ValidationError::new("due_date");
        error.message = Some("Due date must be in the future".into());
        return Err(error);
    }
    Ok(())
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(custom = "validate_title")]
    pub title: String,

    #[validate(custom = "validate_description")]
    pub description: Option<String>,

    /// Defaults to `low` when omitted.
    pub priority: Option<TaskPriority>,

    /// Must be strictly in the future at validation time, if present.
    #[validate(custom = "validate_due_date")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial-update structure for a task. Absent fields leave the stored
/// values untouched.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(custom = "validate_title")]
    pub title: Option<String>,

    #[validate(custom = "validate_description")]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,

    #[validate(custom = "validate_due_date")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4, rendered as a string).
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    /// Timestamp of when the task was created. Never changes afterwards.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
    /// Identifier of the user who owns the task.
    pub owner_id: String,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` for the given owner.
    /// Status always starts as `ongoing`; priority falls back to `low`.
    pub fn new(input: TaskInput, owner_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            status: TaskStatus::Ongoing,
            priority: input.priority.unwrap_or(TaskPriority::Low),
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
            owner_id: owner_id.to_string(),
        }
    }

    /// Applies a partial update in place, advancing `updated_at`.
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(due_date);
        }
        self.updated_at = Utc::now();
    }
}
