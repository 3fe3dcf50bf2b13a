//! Task endpoints

use crate::WeftClient;
use crate::error::Result;
use weft_core::convert::EntityKind;
use weft_core::dto::TaskModel;

impl WeftClient {
    // =============================================================================
    // Task Management
    // =============================================================================

    /// List all tasks
    pub async fn list_tasks(&self) -> Result<Vec<TaskModel>> {
        self.list(EntityKind::Task).await
    }

    /// Get a task by ID
    pub async fn get_task(&self, id: &str) -> Result<TaskModel> {
        self.get(EntityKind::Task, id).await
    }

    /// Get or create the task of a configuration, with its data nodes
    pub async fn create_task(&self, config_id: &str) -> Result<TaskModel> {
        self.create(EntityKind::Task, config_id).await
    }

    /// Delete a task
    pub async fn delete_task(&self, id: &str) -> Result<String> {
        self.delete(EntityKind::Task, id).await
    }

    /// Submit a task for execution
    ///
    /// Returns as soon as the submission is accepted; follow progress through
    /// [`WeftClient::list_jobs`].
    pub async fn submit_task(&self, id: &str) -> Result<String> {
        self.submit(EntityKind::Task, id).await
    }
}
