//! Job endpoints

use crate::WeftClient;
use crate::error::Result;
use weft_core::convert::EntityKind;
use weft_core::dto::JobModel;

impl WeftClient {
    // =============================================================================
    // Jobs
    // =============================================================================

    /// List all jobs
    pub async fn list_jobs(&self) -> Result<Vec<JobModel>> {
        self.list(EntityKind::Job).await
    }

    /// Get a job by ID
    pub async fn get_job(&self, id: &str) -> Result<JobModel> {
        self.get(EntityKind::Job, id).await
    }

    /// Record a job for the task of a configuration
    ///
    /// # Arguments
    /// * `task_config_id` - The task configuration id; the task is created
    ///   first if needed
    pub async fn create_job(&self, task_config_id: &str) -> Result<JobModel> {
        let url = self.url(&["jobs"])?;
        let response = self
            .client
            .post(url)
            .query(&[("task_id", task_config_id)])
            .send()
            .await?;

        let body = Self::handle_response(response).await?;
        Self::unwrap_model(EntityKind::Job, body)
    }

    /// Delete a job
    pub async fn delete_job(&self, id: &str) -> Result<String> {
        self.delete(EntityKind::Job, id).await
    }

    /// Cancel a job
    pub async fn cancel_job(&self, id: &str) -> Result<String> {
        let url = self.url(&["jobs", "cancel", id])?;
        let response = self.client.post(url).send().await?;

        Self::handle_message(response).await
    }
}
