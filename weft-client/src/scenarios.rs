//! Scenario endpoints

use crate::WeftClient;
use crate::error::Result;
use weft_core::convert::EntityKind;
use weft_core::dto::ScenarioModel;

impl WeftClient {
    /// List all scenarios
    pub async fn list_scenarios(&self) -> Result<Vec<ScenarioModel>> {
        self.list(EntityKind::Scenario).await
    }

    pub async fn get_scenario(&self, id: &str) -> Result<ScenarioModel> {
        self.get(EntityKind::Scenario, id).await
    }

    /// Get or create the scenario of a configuration
    pub async fn create_scenario(&self, config_id: &str) -> Result<ScenarioModel> {
        self.create(EntityKind::Scenario, config_id).await
    }

    pub async fn delete_scenario(&self, id: &str) -> Result<String> {
        self.delete(EntityKind::Scenario, id).await
    }

    /// Submit every pipeline of a scenario
    pub async fn submit_scenario(&self, id: &str) -> Result<String> {
        self.submit(EntityKind::Scenario, id).await
    }
}
