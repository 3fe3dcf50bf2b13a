//! Pipeline endpoints

use crate::WeftClient;
use crate::error::Result;
use weft_core::convert::EntityKind;
use weft_core::dto::PipelineModel;

impl WeftClient {
    // =============================================================================
    // Pipeline Management
    // =============================================================================

    /// List all pipelines
    pub async fn list_pipelines(&self) -> Result<Vec<PipelineModel>> {
        self.list(EntityKind::Pipeline).await
    }

    /// Get a pipeline by ID
    pub async fn get_pipeline(&self, id: &str) -> Result<PipelineModel> {
        self.get(EntityKind::Pipeline, id).await
    }

    /// Get or create the pipeline of a configuration
    ///
    /// # Arguments
    /// * `config_id` - The pipeline configuration id
    ///
    /// # Returns
    /// The pipeline; calling again with the same id returns the same pipeline
    pub async fn create_pipeline(&self, config_id: &str) -> Result<PipelineModel> {
        self.create(EntityKind::Pipeline, config_id).await
    }

    /// Delete a pipeline
    pub async fn delete_pipeline(&self, id: &str) -> Result<String> {
        self.delete(EntityKind::Pipeline, id).await
    }

    /// Submit every task of a pipeline
    pub async fn submit_pipeline(&self, id: &str) -> Result<String> {
        self.submit(EntityKind::Pipeline, id).await
    }
}
