//! Scenario domain types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A run context grouping pipelines, optionally attached to a cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub config_id: String,
    pub pipeline_ids: Vec<String>,
    pub cycle_id: Option<String>,
    pub properties: HashMap<String, serde_json::Value>,
    pub is_primary: bool,
    pub tags: Vec<String>,
    pub creation_date: NaiveDateTime,
}
