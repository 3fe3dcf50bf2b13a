//! Data node transport model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::data_node::{DataNode, Scope, StorageType};
use crate::domain::filter::{Condition, Filter, JoinOperator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataNodeModel {
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

impl From<&DataNode> for DataNodeModel {
    fn from(dn: &DataNode) -> Self {
        Self {
            id: dn.id.clone(),
            config_id: dn.config_id.clone(),
            name: dn.name.clone(),
            scope: dn.scope,
            storage_type: dn.storage_type,
            parent_id: dn.parent_id.clone(),
            last_edit_date: dn.last_edit_date,
            job_ids: dn.job_ids.clone(),
            validity_days: dn.validity_days,
            validity_seconds: dn.validity_seconds,
            edit_in_progress: dn.edit_in_progress,
            properties: dn.properties.clone(),
        }
    }
}

/// Body of `GET /datanodes/{id}/read`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadFilter {
    pub operators: Vec<Condition>,
    pub join_operator: JoinOperator,
}

impl From<&Filter> for ReadFilter {
    fn from(filter: &Filter) -> Self {
        Self {
            operators: filter.conditions.clone(),
            join_operator: filter.join,
        }
    }
}
