//! Task transport model

use serde::{Deserialize, Serialize};

use crate::domain::task::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskModel {
    pub id: String,
    pub config_id: String,
    pub parent_id: Option<String>,
    pub input_ids: Vec<String>,
    pub output_ids: Vec<String>,
    pub function_name: String,
    pub function_module: String,
}

impl From<&Task> for TaskModel {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            config_id: task.config_id.clone(),
            parent_id: task.parent_id.clone(),
            input_ids: task.input_ids.clone(),
            output_ids: task.output_ids.clone(),
            function_name: task.function_name.clone(),
            function_module: task.function_module.clone(),
        }
    }
}
