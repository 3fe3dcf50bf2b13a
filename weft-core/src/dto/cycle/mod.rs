//! Cycle transport model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::cycle::{Cycle, Frequency};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleModel {
    pub id: String,
    pub name: String,
    pub frequency: Frequency,
    pub properties: HashMap<String, serde_json::Value>,
    pub creation_date: NaiveDateTime,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl From<&Cycle> for CycleModel {
    fn from(cycle: &Cycle) -> Self {
        Self {
            id: cycle.id.clone(),
            name: cycle.name.clone(),
            frequency: cycle.frequency,
            properties: cycle.properties.clone(),
            creation_date: cycle.creation_date,
            start_date: cycle.start_date,
            end_date: cycle.end_date,
        }
    }
}

/// Body of `POST /cycles`; the server generates `id` and `name` when absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCycle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, serde_json::Value>,
    pub creation_date: NaiveDateTime,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}
