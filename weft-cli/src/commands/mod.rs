//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod cycle;
mod datanode;
mod job;
mod pipeline;
mod scenario;
mod task;

pub use cycle::CycleCommands;
pub use datanode::DataNodeCommands;
pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use serde_json::Value;
use std::collections::HashMap;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Cycle management
    Cycle {
        #[command(subcommand)]
        command: CycleCommands,
    },
    /// Data node management, reading and writing
    Datanode {
        #[command(subcommand)]
        command: DataNodeCommands,
    },
    /// Task management and submission
    Task {
        #[command(subcommand)]
        command: ExecutableCommands,
    },
    /// Pipeline management and submission
    Pipeline {
        #[command(subcommand)]
        command: ExecutableCommands,
    },
    /// Scenario management and submission
    Scenario {
        #[command(subcommand)]
        command: ExecutableCommands,
    },
    /// Job management
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
}

/// Subcommands shared by tasks, pipelines and scenarios
#[derive(Subcommand)]
pub enum ExecutableCommands {
    /// List all entities
    List,
    /// Get entity details
    Get {
        /// Entity ID
        id: String,
    },
    /// Delete an entity
    Delete {
        /// Entity ID
        id: String,
    },
    /// Get or create the entity of a configuration
    Create {
        /// Configuration ID
        config_id: String,
    },
    /// Submit an entity for execution
    Submit {
        /// Entity ID
        id: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        Commands::Cycle { command } => cycle::handle_cycle_command(command, &client).await,
        Commands::Datanode { command } => {
            datanode::handle_data_node_command(command, &client).await
        }
        Commands::Task { command } => task::handle_task_command(command, &client).await,
        Commands::Pipeline { command } => {
            pipeline::handle_pipeline_command(command, &client).await
        }
        Commands::Scenario { command } => {
            scenario::handle_scenario_command(command, &client).await
        }
        Commands::Job { command } => job::handle_job_command(command, &client).await,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Print a server acknowledgement
fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a list header, or a notice when there is nothing to show
fn print_list_header(count: usize, noun: &str) -> bool {
    if count == 0 {
        println!("{}", format!("No {}s found.", noun).yellow());
        return false;
    }
    println!("{}", format!("Found {} {}(s):", count, noun).bold());
    println!();
    true
}

fn print_ids(label: &str, ids: &[String]) {
    if ids.is_empty() {
        println!("  {:<13}{}", label, "-".dimmed());
    } else {
        println!("  {:<13}{}", label, ids.join(", "));
    }
}

fn print_properties(properties: &HashMap<String, Value>) {
    if properties.is_empty() {
        return;
    }
    println!("\n{}", "Properties:".bold());
    let mut keys: Vec<_> = properties.keys().collect();
    keys.sort();
    for key in keys {
        println!("  {} = {}", key.cyan(), properties[key]);
    }
}
