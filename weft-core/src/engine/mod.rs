//! Engine managers
//!
//! The REST layer never owns entities. It reaches the workflow engine through
//! one manager trait per entity kind, bundled in an [`Engine`] handle that is
//! built once at startup and cloned into every request.

pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{Configuration, DataNodeConfig, PipelineConfig, ScenarioConfig, TaskConfig};
use crate::convert::{EntityKind, UnknownEntityKind};
use crate::domain::cycle::Cycle;
use crate::domain::data_node::DataNode;
use crate::domain::filter::Filter;
use crate::domain::job::Job;
use crate::domain::pipeline::Pipeline;
use crate::domain::scenario::Scenario;
use crate::domain::task::Task;

pub use memory::InMemoryEngine;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} config {id} not found")]
    ConfigNotFound { kind: EntityKind, id: String },

    #[error(transparent)]
    UnknownEntityKind(#[from] UnknownEntityKind),

    #[error("Engine failure: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn config_not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        EngineError::ConfigNotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::NotFound { .. } | EngineError::ConfigNotFound { .. }
        )
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[async_trait]
pub trait CycleManager: Send + Sync {
    async fn get(&self, id: &str) -> EngineResult<Option<Cycle>>;
    async fn get_all(&self) -> EngineResult<Vec<Cycle>>;
    /// Insert or replace a cycle
    async fn set(&self, cycle: Cycle) -> EngineResult<()>;
    async fn delete(&self, id: &str) -> EngineResult<()>;
}

#[async_trait]
pub trait DataManager: Send + Sync {
    async fn get(&self, id: &str) -> EngineResult<Option<DataNode>>;
    async fn get_all(&self) -> EngineResult<Vec<DataNode>>;
    async fn get_or_create(&self, config: &DataNodeConfig) -> EngineResult<DataNode>;
    async fn delete(&self, id: &str) -> EngineResult<()>;
    /// Current value of a data node, narrowed by `filter` when given
    async fn read(&self, id: &str, filter: Option<&Filter>) -> EngineResult<Value>;
    async fn write(&self, id: &str, data: Value) -> EngineResult<()>;
}

#[async_trait]
pub trait TaskManager: Send + Sync {
    async fn get(&self, id: &str) -> EngineResult<Option<Task>>;
    async fn get_all(&self) -> EngineResult<Vec<Task>>;
    async fn get_or_create(&self, config: &TaskConfig) -> EngineResult<Task>;
    async fn delete(&self, id: &str) -> EngineResult<()>;
    /// Queue the task for execution and return the job recording it
    async fn submit(&self, id: &str) -> EngineResult<Vec<Job>>;
}

#[async_trait]
pub trait PipelineManager: Send + Sync {
    async fn get(&self, id: &str) -> EngineResult<Option<Pipeline>>;
    async fn get_all(&self) -> EngineResult<Vec<Pipeline>>;
    async fn get_or_create(&self, config: &PipelineConfig) -> EngineResult<Pipeline>;
    async fn delete(&self, id: &str) -> EngineResult<()>;
    async fn submit(&self, id: &str) -> EngineResult<Vec<Job>>;
}

#[async_trait]
pub trait ScenarioManager: Send + Sync {
    async fn get(&self, id: &str) -> EngineResult<Option<Scenario>>;
    async fn get_all(&self) -> EngineResult<Vec<Scenario>>;
    async fn get_or_create(&self, config: &ScenarioConfig) -> EngineResult<Scenario>;
    async fn delete(&self, id: &str) -> EngineResult<()>;
    async fn submit(&self, id: &str) -> EngineResult<Vec<Job>>;
}

#[async_trait]
pub trait JobManager: Send + Sync {
    async fn get(&self, id: &str) -> EngineResult<Option<Job>>;
    async fn get_all(&self) -> EngineResult<Vec<Job>>;
    /// Record a job for the task instantiated from `config`
    async fn create(&self, config: &TaskConfig) -> EngineResult<Job>;
    async fn delete(&self, id: &str) -> EngineResult<()>;
    /// Cancel a job; finished jobs are returned unchanged
    async fn cancel(&self, id: &str) -> EngineResult<Job>;
}

/// Handles to every engine manager plus the static configuration
#[derive(Clone)]
pub struct Engine {
    pub config: Arc<Configuration>,
    pub cycles: Arc<dyn CycleManager>,
    pub data_nodes: Arc<dyn DataManager>,
    pub tasks: Arc<dyn TaskManager>,
    pub pipelines: Arc<dyn PipelineManager>,
    pub scenarios: Arc<dyn ScenarioManager>,
    pub jobs: Arc<dyn JobManager>,
}

impl Engine {
    /// Build an engine backed by process memory
    pub fn in_memory(config: Configuration) -> Self {
        let config = Arc::new(config);
        let engine = Arc::new(InMemoryEngine::new(config.clone()));
        Self {
            config,
            cycles: engine.clone(),
            data_nodes: engine.clone(),
            tasks: engine.clone(),
            pipelines: engine.clone(),
            scenarios: engine.clone(),
            jobs: engine,
        }
    }

    pub fn data_node_config(&self, id: &str) -> EngineResult<&DataNodeConfig> {
        self.config
            .data_node(id)
            .ok_or_else(|| EngineError::config_not_found(EntityKind::DataNode, id))
    }

    pub fn task_config(&self, id: &str) -> EngineResult<&TaskConfig> {
        self.config
            .task(id)
            .ok_or_else(|| EngineError::config_not_found(EntityKind::Task, id))
    }

    pub fn pipeline_config(&self, id: &str) -> EngineResult<&PipelineConfig> {
        self.config
            .pipeline(id)
            .ok_or_else(|| EngineError::config_not_found(EntityKind::Pipeline, id))
    }

    pub fn scenario_config(&self, id: &str) -> EngineResult<&ScenarioConfig> {
        self.config
            .scenario(id)
            .ok_or_else(|| EngineError::config_not_found(EntityKind::Scenario, id))
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::not_found(EntityKind::Cycle, "CYCLE_1");
        assert_eq!(err.to_string(), "Cycle CYCLE_1 not found");
        assert!(err.is_not_found());

        let err = EngineError::config_not_found(EntityKind::Pipeline, "p");
        assert_eq!(err.to_string(), "Pipeline config p not found");
        assert!(err.is_not_found());

        assert!(!EngineError::Internal("boom".to_string()).is_not_found());
    }

    #[test]
    fn test_config_lookup() {
        let engine = Engine::in_memory(
            Configuration::default().with_pipeline(PipelineConfig::default(), "p"),
        );
        assert_eq!(engine.pipeline_config("p").unwrap().id, "p");
        assert!(matches!(
            engine.pipeline_config("q"),
            Err(EngineError::ConfigNotFound { kind: EntityKind::Pipeline, .. })
        ));
        assert!(engine.task_config("p").is_err());
    }
}
