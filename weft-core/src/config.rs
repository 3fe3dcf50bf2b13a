//! Static configuration
//!
//! Configurations are templates declared before the service starts. Runtime
//! entities are instantiated from them by id (`config_id`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::domain::cycle::Frequency;
use crate::domain::data_node::{Scope, StorageType};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{kind} config '{id}' references unknown {missing_kind} config '{missing}'")]
    DanglingReference {
        kind: &'static str,
        id: String,
        missing_kind: &'static str,
        missing: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataNodeConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub storage_type: StorageType,
    #[serde(default)]
    pub scope: Scope,
    /// Storage-specific settings; `default_data` seeds the node's value
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl DataNodeConfig {
    pub fn default_data(&self) -> Option<&serde_json::Value> {
        self.properties.get("default_data")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub function_name: String,
    #[serde(default)]
    pub function_module: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub pipelines: Vec<String>,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

/// Every configuration known to the engine, keyed by config id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub data_nodes: HashMap<String, DataNodeConfig>,
    #[serde(default)]
    pub tasks: HashMap<String, TaskConfig>,
    #[serde(default)]
    pub pipelines: HashMap<String, PipelineConfig>,
    #[serde(default)]
    pub scenarios: HashMap<String, ScenarioConfig>,
}

impl Configuration {
    /// Parse and validate a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: Configuration = serde_json::from_str(json)?;
        config.assign_ids();
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration document from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;

        tracing::info!(
            "Loaded configuration from {}: {} data node(s), {} task(s), {} pipeline(s), {} scenario(s)",
            path.display(),
            config.data_nodes.len(),
            config.tasks.len(),
            config.pipelines.len(),
            config.scenarios.len()
        );

        Ok(config)
    }

    pub fn data_node(&self, id: &str) -> Option<&DataNodeConfig> {
        self.data_nodes.get(id)
    }

    pub fn task(&self, id: &str) -> Option<&TaskConfig> {
        self.tasks.get(id)
    }

    pub fn pipeline(&self, id: &str) -> Option<&PipelineConfig> {
        self.pipelines.get(id)
    }

    pub fn scenario(&self, id: &str) -> Option<&ScenarioConfig> {
        self.scenarios.get(id)
    }

    pub fn with_data_node(mut self, mut config: DataNodeConfig, id: &str) -> Self {
        config.id = id.to_string();
        self.data_nodes.insert(config.id.clone(), config);
        self
    }

    pub fn with_task(mut self, mut config: TaskConfig, id: &str) -> Self {
        config.id = id.to_string();
        self.tasks.insert(config.id.clone(), config);
        self
    }

    pub fn with_pipeline(mut self, mut config: PipelineConfig, id: &str) -> Self {
        config.id = id.to_string();
        self.pipelines.insert(config.id.clone(), config);
        self
    }

    pub fn with_scenario(mut self, mut config: ScenarioConfig, id: &str) -> Self {
        config.id = id.to_string();
        self.scenarios.insert(config.id.clone(), config);
        self
    }

    /// Check that every referenced config id is declared
    pub fn validate(&self) -> Result<(), ConfigError> {
        for task in self.tasks.values() {
            for dn in task.inputs.iter().chain(task.outputs.iter()) {
                if !self.data_nodes.contains_key(dn) {
                    return Err(dangling("Task", &task.id, "data node", dn));
                }
            }
        }

        for pipeline in self.pipelines.values() {
            for task in &pipeline.tasks {
                if !self.tasks.contains_key(task) {
                    return Err(dangling("Pipeline", &pipeline.id, "task", task));
                }
            }
        }

        for scenario in self.scenarios.values() {
            for pipeline in &scenario.pipelines {
                if !self.pipelines.contains_key(pipeline) {
                    return Err(dangling("Scenario", &scenario.id, "pipeline", pipeline));
                }
            }
        }

        Ok(())
    }

    // The map key is the config id.
    fn assign_ids(&mut self) {
        for (id, c) in self.data_nodes.iter_mut() {
            c.id = id.clone();
        }
        for (id, c) in self.tasks.iter_mut() {
            c.id = id.clone();
        }
        for (id, c) in self.pipelines.iter_mut() {
            c.id = id.clone();
        }
        for (id, c) in self.scenarios.iter_mut() {
            c.id = id.clone();
        }
    }
}

fn dangling(
    kind: &'static str,
    id: &str,
    missing_kind: &'static str,
    missing: &str,
) -> ConfigError {
    ConfigError::DanglingReference {
        kind,
        id: id.to_string(),
        missing_kind,
        missing: missing.to_string(),
    }
}
