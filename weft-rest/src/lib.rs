//! Weft REST
//!
//! HTTP front end for the Weft workflow engine. Exposes CRUD and execution
//! endpoints for cycles, data nodes, tasks, pipelines, scenarios and jobs
//! under `/api/v1`.

pub mod api;
pub mod config;
pub mod middleware;
pub mod state;

pub use api::create_router;
pub use config::ServerConfig;
pub use state::AppState;
