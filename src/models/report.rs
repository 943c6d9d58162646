use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn validate_range(input: &ReportInput) -> Result<(), ValidationError> {
    if input.end_date < input.start_date {
        let mut error = ValidationError::new("date_range");
        error.message = Some("End date must not precede start date".into());
        return Err(error);
    }
    Ok(())
}

/// Task counts over a date range, persisted at creation time.
///
/// A report is a snapshot: its counts are computed once and never updated,
/// no matter how the underlying tasks change afterwards.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Report {
    pub id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub overdue_tasks: i64,
    pub created_at: DateTime<Utc>,
    pub owner_id: String,
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_range"))]
pub struct ReportInput {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Report {
    pub fn new(
        input: ReportInput,
        total_tasks: i64,
        completed_tasks: i64,
        overdue_tasks: i64,
        owner_id: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_date: input.start_date,
            end_date: input.end_date,
            total_tasks,
            completed_tasks,
            overdue_tasks,
            created_at: Utc::now(),
            owner_id: owner_id.to_string(),
        }
    }
}
