//! Job transport model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::job::{Job, JobStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobModel {
    pub id: String,
    pub task_id: String,
    pub status: JobStatus,
    pub force: bool,
    pub creation_date: NaiveDateTime,
    pub stacktrace: Vec<String>,
}

impl From<&Job> for JobModel {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            task_id: job.task_id.clone(),
            status: job.status,
            force: job.force,
            creation_date: job.creation_date,
            stacktrace: job.stacktrace.clone(),
        }
    }
}
