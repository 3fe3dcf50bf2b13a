//! In-memory engine
//!
//! Reference implementation of the manager traits. Entities live in hash maps
//! behind one `RwLock`; configurations are instantiated with get-or-create
//! semantics keyed by config id. Submission records jobs but runs nothing.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{
    CycleManager, DataManager, EngineError, EngineResult, JobManager, PipelineManager,
    ScenarioManager, TaskManager,
};
use crate::config::{Configuration, DataNodeConfig, PipelineConfig, ScenarioConfig, TaskConfig};
use crate::convert::EntityKind;
use crate::domain::cycle::{Cycle, Frequency};
use crate::domain::data_node::DataNode;
use crate::domain::filter::Filter;
use crate::domain::job::{Job, JobStatus};
use crate::domain::new_id;
use crate::domain::pipeline::Pipeline;
use crate::domain::scenario::Scenario;
use crate::domain::task::Task;

pub struct InMemoryEngine {
    config: Arc<Configuration>,
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    cycles: HashMap<String, Cycle>,
    data_nodes: HashMap<String, DataNode>,
    data: HashMap<String, Value>,
    tasks: HashMap<String, Task>,
    pipelines: HashMap<String, Pipeline>,
    scenarios: HashMap<String, Scenario>,
    jobs: HashMap<String, Job>,
}

impl InMemoryEngine {
    pub fn new(config: Arc<Configuration>) -> Self {
        Self {
            config,
            state: RwLock::new(State::default()),
        }
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn remove_or_not_found<T>(
    map: &mut HashMap<String, T>,
    kind: EntityKind,
    id: &str,
) -> EngineResult<T> {
    map.remove(id).ok_or_else(|| EngineError::not_found(kind, id))
}

impl State {
    fn data_node_for(&mut self, config: &DataNodeConfig, parent: Option<&str>) -> DataNode {
        if let Some(existing) = self
            .data_nodes
            .values()
            .find(|dn| dn.config_id == config.id)
        {
            return existing.clone();
        }

        let default_data = config.default_data().cloned();
        let dn = DataNode {
            id: new_id("DATANODE", &config.id),
            config_id: config.id.clone(),
            name: config.id.clone(),
            scope: config.scope,
            storage_type: config.storage_type,
            parent_id: parent.map(str::to_string),
            last_edit_date: default_data.as_ref().map(|_| now()),
            job_ids: Vec::new(),
            validity_days: None,
            validity_seconds: None,
            edit_in_progress: false,
            properties: config.properties.clone(),
        };

        if let Some(data) = default_data {
            self.data.insert(dn.id.clone(), data);
        }
        self.data_nodes.insert(dn.id.clone(), dn.clone());
        tracing::debug!("Data node created: {} ({})", dn.id, config.id);
        dn
    }

    fn task_for(
        &mut self,
        configs: &Configuration,
        config: &TaskConfig,
        parent: Option<&str>,
    ) -> EngineResult<Task> {
        if let Some(existing) = self.tasks.values().find(|t| t.config_id == config.id) {
            return Ok(existing.clone());
        }

        let id = new_id("TASK", &config.id);
        let mut input_ids = Vec::with_capacity(config.inputs.len());
        for dn in &config.inputs {
            let dn_config = configs
                .data_node(dn)
                .ok_or_else(|| EngineError::config_not_found(EntityKind::DataNode, dn))?;
            input_ids.push(self.data_node_for(dn_config, Some(id.as_str())).id);
        }
        let mut output_ids = Vec::with_capacity(config.outputs.len());
        for dn in &config.outputs {
            let dn_config = configs
                .data_node(dn)
                .ok_or_else(|| EngineError::config_not_found(EntityKind::DataNode, dn))?;
            output_ids.push(self.data_node_for(dn_config, Some(id.as_str())).id);
        }

        let task = Task {
            id,
            config_id: config.id.clone(),
            parent_id: parent.map(str::to_string),
            input_ids,
            output_ids,
            function_name: config.function_name.clone(),
            function_module: config.function_module.clone(),
        };
        self.tasks.insert(task.id.clone(), task.clone());
        tracing::debug!("Task created: {} ({})", task.id, config.id);
        Ok(task)
    }

    fn pipeline_for(
        &mut self,
        configs: &Configuration,
        config: &PipelineConfig,
        parent: Option<&str>,
    ) -> EngineResult<Pipeline> {
        if let Some(existing) = self
            .pipelines
            .values()
            .find(|p| p.config_id == config.id)
        {
            return Ok(existing.clone());
        }

        let id = new_id("PIPELINE", &config.id);
        let mut task_ids = Vec::with_capacity(config.tasks.len());
        for task in &config.tasks {
            let task_config = configs
                .task(task)
                .ok_or_else(|| EngineError::config_not_found(EntityKind::Task, task))?;
            task_ids.push(self.task_for(configs, task_config, Some(id.as_str()))?.id);
        }

        let pipeline = Pipeline {
            id,
            config_id: config.id.clone(),
            parent_id: parent.map(str::to_string),
            task_ids,
            properties: config.properties.clone(),
        };
        self.pipelines.insert(pipeline.id.clone(), pipeline.clone());
        tracing::debug!("Pipeline created: {} ({})", pipeline.id, config.id);
        Ok(pipeline)
    }

    fn cycle_for(&mut self, frequency: Frequency, at: NaiveDateTime) -> Cycle {
        if let Some(existing) = self
            .cycles
            .values()
            .find(|c| c.frequency == frequency && c.contains(at))
        {
            return existing.clone();
        }

        let (start_date, end_date) = frequency.window(at);
        let mut properties = HashMap::new();
        properties.insert(
            "display_name".to_string(),
            Value::String(start_date.format("%Y-%m-%dT%H:%M:%S").to_string()),
        );
        let cycle = Cycle {
            id: new_id("CYCLE", frequency.as_str()),
            name: format!("{}_{}", frequency, at.format("%Y-%m-%dT%H:%M:%S%.6f")),
            frequency,
            properties,
            creation_date: at,
            start_date,
            end_date,
        };
        self.cycles.insert(cycle.id.clone(), cycle.clone());
        tracing::debug!("Cycle created: {} ({})", cycle.id, frequency);
        cycle
    }

    fn submit_task(&mut self, task_id: &str) -> EngineResult<Job> {
        let task = self
            .tasks
            .get(task_id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Task, task_id))?;
        let output_ids = task.output_ids.clone();

        let job = Job {
            id: new_id("JOB", ""),
            task_id: task_id.to_string(),
            status: JobStatus::Submitted,
            force: false,
            creation_date: now(),
            stacktrace: Vec::new(),
        };

        for dn in output_ids {
            if let Some(dn) = self.data_nodes.get_mut(&dn) {
                dn.job_ids.push(job.id.clone());
            }
        }
        self.jobs.insert(job.id.clone(), job.clone());
        tracing::info!("Job {} submitted for task {}", job.id, task_id);
        Ok(job)
    }

    fn submit_tasks(&mut self, task_ids: &[String]) -> Vec<Job> {
        let mut jobs = Vec::with_capacity(task_ids.len());
        for task_id in task_ids {
            match self.submit_task(task_id) {
                Ok(job) => jobs.push(job),
                Err(e) => tracing::warn!("Skipping task {}: {}", task_id, e),
            }
        }
        jobs
    }
}

#[async_trait]
impl CycleManager for InMemoryEngine {
    async fn get(&self, id: &str) -> EngineResult<Option<Cycle>> {
        Ok(self.state.read().await.cycles.get(id).cloned())
    }

    async fn get_all(&self) -> EngineResult<Vec<Cycle>> {
        Ok(self.state.read().await.cycles.values().cloned().collect())
    }

    async fn set(&self, cycle: Cycle) -> EngineResult<()> {
        self.state
            .write()
            .await
            .cycles
            .insert(cycle.id.clone(), cycle);
        Ok(())
    }

    async fn delete(&self, id: &str) -> EngineResult<()> {
        let mut state = self.state.write().await;
        remove_or_not_found(&mut state.cycles, EntityKind::Cycle, id)?;
        Ok(())
    }
}

#[async_trait]
impl DataManager for InMemoryEngine {
    async fn get(&self, id: &str) -> EngineResult<Option<DataNode>> {
        Ok(self.state.read().await.data_nodes.get(id).cloned())
    }

    async fn get_all(&self) -> EngineResult<Vec<DataNode>> {
        Ok(self.state.read().await.data_nodes.values().cloned().collect())
    }

    async fn get_or_create(&self, config: &DataNodeConfig) -> EngineResult<DataNode> {
        Ok(self.state.write().await.data_node_for(config, None))
    }

    async fn delete(&self, id: &str) -> EngineResult<()> {
        let mut state = self.state.write().await;
        remove_or_not_found(&mut state.data_nodes, EntityKind::DataNode, id)?;
        state.data.remove(id);
        Ok(())
    }

    async fn read(&self, id: &str, filter: Option<&Filter>) -> EngineResult<Value> {
        let state = self.state.read().await;
        if !state.data_nodes.contains_key(id) {
            return Err(EngineError::not_found(EntityKind::DataNode, id));
        }
        let data = state.data.get(id).cloned().unwrap_or(Value::Null);
        Ok(match filter {
            Some(filter) => filter.apply(data),
            None => data,
        })
    }

    async fn write(&self, id: &str, data: Value) -> EngineResult<()> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let dn = state
            .data_nodes
            .get_mut(id)
            .ok_or_else(|| EngineError::not_found(EntityKind::DataNode, id))?;
        dn.last_edit_date = Some(now());
        dn.edit_in_progress = false;
        state.data.insert(id.to_string(), data);
        Ok(())
    }
}

#[async_trait]
impl TaskManager for InMemoryEngine {
    async fn get(&self, id: &str) -> EngineResult<Option<Task>> {
        Ok(self.state.read().await.tasks.get(id).cloned())
    }

    async fn get_all(&self) -> EngineResult<Vec<Task>> {
        Ok(self.state.read().await.tasks.values().cloned().collect())
    }

    async fn get_or_create(&self, config: &TaskConfig) -> EngineResult<Task> {
        self.state
            .write()
            .await
            .task_for(&self.config, config, None)
    }

    async fn delete(&self, id: &str) -> EngineResult<()> {
        let mut state = self.state.write().await;
        remove_or_not_found(&mut state.tasks, EntityKind::Task, id)?;
        Ok(())
    }

    async fn submit(&self, id: &str) -> EngineResult<Vec<Job>> {
        let job = self.state.write().await.submit_task(id)?;
        Ok(vec![job])
    }
}

#[async_trait]
impl PipelineManager for InMemoryEngine {
    async fn get(&self, id: &str) -> EngineResult<Option<Pipeline>> {
        Ok(self.state.read().await.pipelines.get(id).cloned())
    }

    async fn get_all(&self) -> EngineResult<Vec<Pipeline>> {
        Ok(self.state.read().await.pipelines.values().cloned().collect())
    }

    async fn get_or_create(&self, config: &PipelineConfig) -> EngineResult<Pipeline> {
        self.state
            .write()
            .await
            .pipeline_for(&self.config, config, None)
    }

    async fn delete(&self, id: &str) -> EngineResult<()> {
        let mut state = self.state.write().await;
        remove_or_not_found(&mut state.pipelines, EntityKind::Pipeline, id)?;
        Ok(())
    }

    async fn submit(&self, id: &str) -> EngineResult<Vec<Job>> {
        let mut state = self.state.write().await;
        let task_ids = state
            .pipelines
            .get(id)
            .map(|p| p.task_ids.clone())
            .ok_or_else(|| EngineError::not_found(EntityKind::Pipeline, id))?;
        Ok(state.submit_tasks(&task_ids))
    }
}

#[async_trait]
impl ScenarioManager for InMemoryEngine {
    async fn get(&self, id: &str) -> EngineResult<Option<Scenario>> {
        Ok(self.state.read().await.scenarios.get(id).cloned())
    }

    async fn get_all(&self) -> EngineResult<Vec<Scenario>> {
        Ok(self.state.read().await.scenarios.values().cloned().collect())
    }

    async fn get_or_create(&self, config: &ScenarioConfig) -> EngineResult<Scenario> {
        let mut state = self.state.write().await;
        if let Some(existing) = state
            .scenarios
            .values()
            .find(|s| s.config_id == config.id)
        {
            return Ok(existing.clone());
        }

        let id = new_id("SCENARIO", &config.id);
        let mut pipeline_ids = Vec::with_capacity(config.pipelines.len());
        for pipeline in &config.pipelines {
            let pipeline_config = self
                .config
                .pipeline(pipeline)
                .ok_or_else(|| EngineError::config_not_found(EntityKind::Pipeline, pipeline))?;
            let pipeline = state.pipeline_for(&self.config, pipeline_config, Some(id.as_str()))?;
            pipeline_ids.push(pipeline.id);
        }

        let creation_date = now();
        let cycle_id = config
            .frequency
            .map(|f| state.cycle_for(f, creation_date).id);
        let is_primary = match &cycle_id {
            Some(cycle_id) => !state
                .scenarios
                .values()
                .any(|s| s.cycle_id.as_ref() == Some(cycle_id) && s.is_primary),
            None => false,
        };

        let scenario = Scenario {
            id,
            config_id: config.id.clone(),
            pipeline_ids,
            cycle_id,
            properties: config.properties.clone(),
            is_primary,
            tags: Vec::new(),
            creation_date,
        };
        state.scenarios.insert(scenario.id.clone(), scenario.clone());
        tracing::debug!("Scenario created: {} ({})", scenario.id, config.id);
        Ok(scenario)
    }

    async fn delete(&self, id: &str) -> EngineResult<()> {
        let mut state = self.state.write().await;
        remove_or_not_found(&mut state.scenarios, EntityKind::Scenario, id)?;
        Ok(())
    }

    async fn submit(&self, id: &str) -> EngineResult<Vec<Job>> {
        let mut state = self.state.write().await;
        let pipeline_ids = state
            .scenarios
            .get(id)
            .map(|s| s.pipeline_ids.clone())
            .ok_or_else(|| EngineError::not_found(EntityKind::Scenario, id))?;

        let mut jobs = Vec::new();
        for pipeline_id in pipeline_ids {
            let Some(task_ids) = state.pipelines.get(&pipeline_id).map(|p| p.task_ids.clone())
            else {
                tracing::warn!("Skipping missing pipeline {} of scenario {}", pipeline_id, id);
                continue;
            };
            jobs.extend(state.submit_tasks(&task_ids));
        }
        Ok(jobs)
    }
}

#[async_trait]
impl JobManager for InMemoryEngine {
    async fn get(&self, id: &str) -> EngineResult<Option<Job>> {
        Ok(self.state.read().await.jobs.get(id).cloned())
    }

    async fn get_all(&self) -> EngineResult<Vec<Job>> {
        Ok(self.state.read().await.jobs.values().cloned().collect())
    }

    async fn create(&self, config: &TaskConfig) -> EngineResult<Job> {
        let mut state = self.state.write().await;
        let task = state.task_for(&self.config, config, None)?;
        state.submit_task(&task.id)
    }

    async fn delete(&self, id: &str) -> EngineResult<()> {
        let mut state = self.state.write().await;
        remove_or_not_found(&mut state.jobs, EntityKind::Job, id)?;
        Ok(())
    }

    async fn cancel(&self, id: &str) -> EngineResult<Job> {
        let mut state = self.state.write().await;
        let job = state
            .jobs
            .get_mut(id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Job, id))?;
        if !job.status.is_finished() {
            job.status = JobStatus::Canceled;
            tracing::info!("Job {} cancelled", id);
        }
        Ok(job.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use serde_json::json;

    fn configuration() -> Configuration {
        Configuration::from_json_str(
            r#"{
                "data_nodes": {
                    "input": { "properties": { "default_data": [1, 2, 3, 4, 5, 6] } },
                    "output": {}
                },
                "tasks": {
                    "double": { "inputs": ["input"], "outputs": ["output"], "function_name": "double", "function_module": "algos" }
                },
                "pipelines": { "main": { "tasks": ["double"] } },
                "scenarios": {
                    "daily": { "pipelines": ["main"], "frequency": "DAILY" },
                    "adhoc": { "pipelines": ["main"] }
                }
            }"#,
        )
        .unwrap()
    }

    fn engine() -> Engine {
        Engine::in_memory(configuration())
    }

    #[tokio::test]
    async fn test_pipeline_get_or_create_is_idempotent() {
        let engine = engine();
        let config = engine.pipeline_config("main").unwrap().clone();

        let first = engine.pipelines.get_or_create(&config).await.unwrap();
        let second = engine.pipelines.get_or_create(&config).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(engine.pipelines.get_all().await.unwrap().len(), 1);

        // the pipeline instantiated its task and both data nodes
        assert_eq!(first.task_ids.len(), 1);
        let task = engine.tasks.get(&first.task_ids[0]).await.unwrap().unwrap();
        assert_eq!(task.parent_id.as_deref(), Some(first.id.as_str()));
        assert_eq!(engine.data_nodes.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_scenario_attaches_to_cycle() {
        let engine = engine();
        let config = engine.scenario_config("daily").unwrap().clone();

        let scenario = engine.scenarios.get_or_create(&config).await.unwrap();
        let cycle_id = scenario.cycle_id.clone().unwrap();
        let cycle = engine.cycles.get(&cycle_id).await.unwrap().unwrap();
        assert_eq!(cycle.frequency, Frequency::Daily);
        assert!(cycle.contains(scenario.creation_date));
        assert!(scenario.is_primary);

        let adhoc = engine.scenario_config("adhoc").unwrap().clone();
        let adhoc = engine.scenarios.get_or_create(&adhoc).await.unwrap();
        assert!(adhoc.cycle_id.is_none());
        assert!(!adhoc.is_primary);
        // both scenarios share the pipeline instantiated from "main"
        assert_eq!(adhoc.pipeline_ids, scenario.pipeline_ids);
    }

    #[tokio::test]
    async fn test_default_data_then_write_then_read() {
        let engine = engine();
        let config = engine.data_node_config("input").unwrap().clone();
        let dn = engine.data_nodes.get_or_create(&config).await.unwrap();
        assert!(dn.last_edit_date.is_some());

        let data = engine.data_nodes.read(&dn.id, None).await.unwrap();
        assert_eq!(data, json!([1, 2, 3, 4, 5, 6]));

        engine.data_nodes.write(&dn.id, json!([1, 2, 3])).await.unwrap();
        let data = engine.data_nodes.read(&dn.id, None).await.unwrap();
        assert_eq!(data, json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn test_read_unwritten_node_is_null() {
        let engine = engine();
        let config = engine.data_node_config("output").unwrap().clone();
        let dn = engine.data_nodes.get_or_create(&config).await.unwrap();
        assert!(dn.last_edit_date.is_none());
        assert_eq!(engine.data_nodes.read(&dn.id, None).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_read_and_write_unknown_node() {
        let engine = engine();
        let err = engine.data_nodes.read("nope", None).await.unwrap_err();
        assert!(err.is_not_found());
        let err = engine.data_nodes.write("nope", json!(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Data node nope not found");
    }

    #[tokio::test]
    async fn test_delete_removes_entity() {
        let engine = engine();
        let config = engine.task_config("double").unwrap().clone();
        let task = engine.tasks.get_or_create(&config).await.unwrap();

        engine.tasks.delete(&task.id).await.unwrap();
        assert!(engine.tasks.get(&task.id).await.unwrap().is_none());

        let err = engine.tasks.delete(&task.id).await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound { kind: EntityKind::Task, .. }));
    }

    #[tokio::test]
    async fn test_submit_records_jobs() {
        let engine = engine();
        let config = engine.scenario_config("daily").unwrap().clone();
        let scenario = engine.scenarios.get_or_create(&config).await.unwrap();

        let jobs = engine.scenarios.submit(&scenario.id).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].status, JobStatus::Submitted);
        assert_eq!(engine.jobs.get_all().await.unwrap().len(), 1);

        // output data node remembers the job
        let task = engine.tasks.get(&jobs[0].task_id).await.unwrap().unwrap();
        let output = engine.data_nodes.get(&task.output_ids[0]).await.unwrap().unwrap();
        assert_eq!(output.job_ids, vec![jobs[0].id.clone()]);

        assert!(engine.pipelines.submit("nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_cancel_job() {
        let engine = engine();
        let config = engine.task_config("double").unwrap().clone();
        let job = engine.jobs.create(&config).await.unwrap();

        let cancelled = engine.jobs.cancel(&job.id).await.unwrap();
        assert_eq!(cancelled.status, JobStatus::Canceled);

        // cancelling again leaves the job untouched
        let again = engine.jobs.cancel(&job.id).await.unwrap();
        assert_eq!(again.status, JobStatus::Canceled);

        assert!(engine.jobs.cancel("JOB_missing").await.is_err());
    }

    #[tokio::test]
    async fn test_cycle_set_and_delete() {
        let engine = engine();
        let at = now();
        let (start_date, end_date) = Frequency::Weekly.window(at);
        let cycle = Cycle {
            id: "CYCLE_WEEKLY_1".to_string(),
            name: "weekly".to_string(),
            frequency: Frequency::Weekly,
            properties: HashMap::new(),
            creation_date: at,
            start_date,
            end_date,
        };
        engine.cycles.set(cycle.clone()).await.unwrap();
        assert_eq!(engine.cycles.get(&cycle.id).await.unwrap(), Some(cycle.clone()));

        engine.cycles.delete(&cycle.id).await.unwrap();
        assert!(engine.cycles.get_all().await.unwrap().is_empty());
    }
}
