//! Pipeline domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named, ordered group of tasks forming an execution unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub config_id: String,
    pub parent_id: Option<String>,
    pub task_ids: Vec<String>,
    pub properties: HashMap<String, serde_json::Value>,
}
