//! Data node endpoints

use crate::WeftClient;
use crate::error::{ClientError, Result};
use serde_json::Value;
use weft_core::convert::EntityKind;
use weft_core::domain::filter::Filter;
use weft_core::dto::{DataNodeModel, ReadFilter};

impl WeftClient {
    // =============================================================================
    // Data Node Management
    // =============================================================================

    /// List all data nodes
    pub async fn list_data_nodes(&self) -> Result<Vec<DataNodeModel>> {
        self.list(EntityKind::DataNode).await
    }

    /// Get a data node by ID
    pub async fn get_data_node(&self, id: &str) -> Result<DataNodeModel> {
        self.get(EntityKind::DataNode, id).await
    }

    /// Get or create the data node of a configuration
    ///
    /// # Arguments
    /// * `config_id` - The data node configuration id
    pub async fn create_data_node(&self, config_id: &str) -> Result<DataNodeModel> {
        self.create(EntityKind::DataNode, config_id).await
    }

    /// Delete a data node
    pub async fn delete_data_node(&self, id: &str) -> Result<String> {
        self.delete(EntityKind::DataNode, id).await
    }

    /// Read the content of a data node
    ///
    /// # Arguments
    /// * `id` - The data node id
    /// * `filter` - Conditions applied to tabular content, if any
    ///
    /// # Returns
    /// The stored value, `null` when nothing was written yet
    pub async fn read_data_node(&self, id: &str, filter: Option<&Filter>) -> Result<Value> {
        let url = self.url(&["datanodes", id, "read"])?;
        let mut request = self.client.get(url);
        if let Some(filter) = filter {
            request = request.json(&ReadFilter::from(filter));
        }
        let response = request.send().await?;

        let mut body: Value = Self::handle_response(response).await?;
        body.get_mut("data")
            .map(Value::take)
            .ok_or_else(|| ClientError::ParseError("Missing 'data' in response".to_string()))
    }

    /// Replace the content of a data node
    pub async fn write_data_node(&self, id: &str, data: &Value) -> Result<String> {
        let url = self.url(&["datanodes", id, "write"])?;
        let response = self.client.put(url).json(data).send().await?;

        Self::handle_message(response).await
    }
}
