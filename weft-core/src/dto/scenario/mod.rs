//! Scenario transport model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::scenario::Scenario;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioModel {
    pub id: String,
    pub config_id: String,
    pub pipeline_ids: Vec<String>,
    /// Id of the cycle the scenario belongs to
    pub cycle: Option<String>,
    pub properties: HashMap<String, serde_json::Value>,
    pub primary_scenario: bool,
    pub tags: Vec<String>,
    pub creation_date: NaiveDateTime,
}

impl From<&Scenario> for ScenarioModel {
    fn from(scenario: &Scenario) -> Self {
        Self {
            id: scenario.id.clone(),
            config_id: scenario.config_id.clone(),
            pipeline_ids: scenario.pipeline_ids.clone(),
            cycle: scenario.cycle_id.clone(),
            properties: scenario.properties.clone(),
            primary_scenario: scenario.is_primary,
            tags: scenario.tags.clone(),
            creation_date: scenario.creation_date,
        }
    }
}
