//! Data node domain types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Visibility scope of a data node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Scope {
    Pipeline,
    #[default]
    Scenario,
    Cycle,
    Global,
}

/// Storage backend of a data node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    #[default]
    InMemory,
    Csv,
    Excel,
    Json,
    Pickle,
    Sql,
    Generic,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::InMemory => "in_memory",
            StorageType::Csv => "csv",
            StorageType::Excel => "excel",
            StorageType::Json => "json",
            StorageType::Pickle => "pickle",
            StorageType::Sql => "sql",
            StorageType::Generic => "generic",
        }
    }
}

/// A named, typed data slot
///
/// The value itself is held by the engine and reached through the read/write
/// operations of the data manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataNode {
    pub id: String,
    pub config_id: String,
    pub name: String,
    pub scope: Scope,
    pub storage_type: StorageType,
    pub parent_id: Option<String>,
    pub last_edit_date: Option<NaiveDateTime>,
    pub job_ids: Vec<String>,
    pub validity_days: Option<f64>,
    pub validity_seconds: Option<f64>,
    pub edit_in_progress: bool,
    pub properties: HashMap<String, serde_json::Value>,
}
