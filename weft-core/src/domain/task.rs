//! Task domain types

use serde::{Deserialize, Serialize};

/// A unit of computation bound to a function and its data dependencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub config_id: String,
    pub parent_id: Option<String>,
    pub input_ids: Vec<String>,
    pub output_ids: Vec<String>,
    pub function_name: String,
    pub function_module: String,
}
