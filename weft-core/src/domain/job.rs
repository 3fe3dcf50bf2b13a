//! Job domain types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Execution record of a task submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub task_id: String,
    pub status: JobStatus,
    pub force: bool,
    pub creation_date: NaiveDateTime,
    pub stacktrace: Vec<String>,
}

/// Job execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Submitted,
    Blocked,
    Pending,
    Running,
    Canceled,
    Failed,
    Completed,
    Skipped,
}

impl JobStatus {
    /// Whether the job reached a state it will never leave
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            JobStatus::Canceled | JobStatus::Failed | JobStatus::Completed | JobStatus::Skipped
        )
    }
}
