//! Task planner model types.
//!
//! Storage lives in [`crate::storage::PlannerDb`]; these are the rows
//! it hands back, serializable for CLI output.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A planned task. Due date and time are independent: a task may have
/// neither, a date only, or a date with a time of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
}

/// Fields for creating a task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: None,
            due_time: None,
        }
    }
}
