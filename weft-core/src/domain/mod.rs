//! Core domain types
//!
//! Entities as the workflow engine hands them out. They carry structure only;
//! lifecycle and execution live behind the engine managers.

pub mod cycle;
pub mod data_node;
pub mod filter;
pub mod job;
pub mod pipeline;
pub mod scenario;
pub mod task;

/// Build an engine id of the form `<PREFIX>_<name>_<uuid>`
///
/// The name part is omitted when empty.
pub fn new_id(prefix: &str, name: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    if name.is_empty() {
        format!("{}_{}", prefix, uuid)
    } else {
        format!("{}_{}_{}", prefix, name, uuid)
    }
}
