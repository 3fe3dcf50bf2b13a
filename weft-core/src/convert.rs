//! Entity converter
//!
//! Maps engine entities to their transport models. Dispatch goes through the
//! [`Entity`] tagged union, so every kind has a converter by construction.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::cycle::Cycle;
use crate::domain::data_node::DataNode;
use crate::domain::job::Job;
use crate::domain::pipeline::Pipeline;
use crate::domain::scenario::Scenario;
use crate::domain::task::Task;
use crate::dto::{CycleModel, DataNodeModel, JobModel, PipelineModel, ScenarioModel, TaskModel};

/// Entity kinds exposed over the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Cycle,
    DataNode,
    Task,
    Pipeline,
    Scenario,
    Job,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Cycle,
        EntityKind::DataNode,
        EntityKind::Task,
        EntityKind::Pipeline,
        EntityKind::Scenario,
        EntityKind::Job,
    ];

    /// Repository name used by the engine
    pub fn repository(&self) -> &'static str {
        match self {
            EntityKind::Cycle => "cycle",
            EntityKind::DataNode => "data",
            EntityKind::Task => "task",
            EntityKind::Pipeline => "pipeline",
            EntityKind::Scenario => "scenario",
            EntityKind::Job => "job",
        }
    }

    /// URL segment of the collection resource
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Cycle => "cycles",
            EntityKind::DataNode => "datanodes",
            EntityKind::Task => "tasks",
            EntityKind::Pipeline => "pipelines",
            EntityKind::Scenario => "scenarios",
            EntityKind::Job => "jobs",
        }
    }

    /// Key wrapping a single model in response bodies
    pub fn key(&self) -> &'static str {
        match self {
            EntityKind::Cycle => "cycle",
            EntityKind::DataNode => "datanode",
            EntityKind::Task => "task",
            EntityKind::Pipeline => "pipeline",
            EntityKind::Scenario => "scenario",
            EntityKind::Job => "job",
        }
    }

    /// Human-readable, capitalized name
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Cycle => "Cycle",
            EntityKind::DataNode => "Data node",
            EntityKind::Task => "Task",
            EntityKind::Pipeline => "Pipeline",
            EntityKind::Scenario => "Scenario",
            EntityKind::Job => "Job",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A repository name that matches no entity kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown entity kind '{0}'")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|k| k.repository() == s)
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Cycle(Cycle),
    DataNode(DataNode),
    Task(Task),
    Pipeline(Pipeline),
    Scenario(Scenario),
    Job(Job),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Cycle(_) => EntityKind::Cycle,
            Entity::DataNode(_) => EntityKind::DataNode,
            Entity::Task(_) => EntityKind::Task,
            Entity::Pipeline(_) => EntityKind::Pipeline,
            Entity::Scenario(_) => EntityKind::Scenario,
            Entity::Job(_) => EntityKind::Job,
        }
    }
}

/// A converted entity, serialized as the bare model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Model {
    Cycle(CycleModel),
    DataNode(DataNodeModel),
    Task(TaskModel),
    Pipeline(PipelineModel),
    Scenario(ScenarioModel),
    Job(JobModel),
}

/// Convert an entity to its transport model
pub fn to_model(entity: &Entity) -> Model {
    match entity {
        Entity::Cycle(e) => Model::Cycle(e.into()),
        Entity::DataNode(e) => Model::DataNode(e.into()),
        Entity::Task(e) => Model::Task(e.into()),
        Entity::Pipeline(e) => Model::Pipeline(e.into()),
        Entity::Scenario(e) => Model::Scenario(e.into()),
        Entity::Job(e) => Model::Job(e.into()),
    }
}

/// Convert a batch of entities of one kind
pub fn to_models<E: Into<Entity>>(entities: impl IntoIterator<Item = E>) -> Vec<Model> {
    entities
        .into_iter()
        .map(|e| to_model(&e.into()))
        .collect()
}

macro_rules! impl_into_entity {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Entity {
                fn from(e: $ty) -> Self {
                    Entity::$ty(e)
                }
            }
        )*
    };
}

impl_into_entity!(Cycle, DataNode, Task, Pipeline, Scenario, Job);
