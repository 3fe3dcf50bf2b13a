//! Transport models
//!
//! The shapes that travel over HTTP. The REST service serializes them and the
//! client deserializes them; each one is built from its domain entity by the
//! converter in [`crate::convert`].

pub mod cycle;
pub mod data_node;
pub mod job;
pub mod pipeline;
pub mod scenario;
pub mod task;

pub use cycle::{CreateCycle, CycleModel};
pub use data_node::{DataNodeModel, ReadFilter};
pub use job::JobModel;
pub use pipeline::PipelineModel;
pub use scenario::ScenarioModel;
pub use task::TaskModel;
