//! Cycle endpoints

use crate::WeftClient;
use crate::error::Result;
use weft_core::convert::EntityKind;
use weft_core::dto::{CreateCycle, CycleModel};

impl WeftClient {
    // =============================================================================
    // Cycle Management
    // =============================================================================

    /// List all cycles
    pub async fn list_cycles(&self) -> Result<Vec<CycleModel>> {
        self.list(EntityKind::Cycle).await
    }

    /// Get a cycle by ID
    pub async fn get_cycle(&self, id: &str) -> Result<CycleModel> {
        self.get(EntityKind::Cycle, id).await
    }

    /// Create a cycle
    ///
    /// # Arguments
    /// * `req` - Frequency and dates of the cycle; `id` and `name` are
    ///   generated by the server when left empty
    ///
    /// # Returns
    /// The created cycle
    pub async fn create_cycle(&self, req: &CreateCycle) -> Result<CycleModel> {
        let url = self.url(&["cycles"])?;
        let response = self.client.post(url).json(req).send().await?;

        let body = Self::handle_response(response).await?;
        Self::unwrap_model(EntityKind::Cycle, body)
    }

    /// Delete a cycle
    pub async fn delete_cycle(&self, id: &str) -> Result<String> {
        self.delete(EntityKind::Cycle, id).await
    }
}
