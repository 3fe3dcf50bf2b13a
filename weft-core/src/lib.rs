//! Weft Core
//!
//! Core types and abstractions for the Weft workflow engine and its REST layer.
//!
//! This crate contains:
//! - Domain types: Core business entities (Cycle, DataNode, Task, ...)
//! - DTOs: Serializable models returned by the REST API
//! - Configuration: Static entity configurations entities are instantiated from
//! - Engine: Manager traits plus an in-memory implementation

pub mod config;
pub mod convert;
pub mod domain;
pub mod dto;
pub mod engine;
