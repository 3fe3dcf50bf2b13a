//! Pipeline transport model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::pipeline::Pipeline;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineModel {
    pub id: String,
    pub config_id: String,
    pub parent_id: Option<String>,
    pub task_ids: Vec<String>,
    pub properties: HashMap<String, serde_json::Value>,
}

impl From<&Pipeline> for PipelineModel {
    fn from(pipeline: &Pipeline) -> Self {
        Self {
            id: pipeline.id.clone(),
            config_id: pipeline.config_id.clone(),
            parent_id: pipeline.parent_id.clone(),
            task_ids: pipeline.task_ids.clone(),
            properties: pipeline.properties.clone(),
        }
    }
}
