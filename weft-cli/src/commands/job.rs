//! Job command handlers
//!
//! Handles job-related CLI commands: listing, viewing details, creating jobs
//! from task configurations and cancelling them.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use weft_client::WeftClient;
use weft_core::domain::job::JobStatus;
use weft_core::dto::JobModel;

use super::{print_list_header, print_success};

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// List all jobs
    List,
    /// Get job details
    Get {
        /// Job ID
        id: String,
    },
    /// Delete a job
    Delete {
        /// Job ID
        id: String,
    },
    /// Record a job for the task of a configuration
    Create {
        /// Task configuration ID
        task_config_id: String,
    },
    /// Cancel a job
    Cancel {
        /// Job ID
        id: String,
    },
}

/// Handle job commands
///
/// Routes job subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The job command to execute
/// * `client` - Client for the REST service
pub async fn handle_job_command(command: JobCommands, client: &WeftClient) -> Result<()> {
    match command {
        JobCommands::List => list_all_jobs(client).await?,
        JobCommands::Get { id } => print_job_details(&client.get_job(&id).await?),
        JobCommands::Delete { id } => print_success(&client.delete_job(&id).await?),
        JobCommands::Create { task_config_id } => {
            let job = client.create_job(&task_config_id).await?;
            print_success("Job was created.");
            print_job_details(&job);
        }
        JobCommands::Cancel { id } => print_success(&client.cancel_job(&id).await?),
    }

    Ok(())
}

/// List all jobs
async fn list_all_jobs(client: &WeftClient) -> Result<()> {
    let jobs = client.list_jobs().await?;

    if print_list_header(jobs.len(), "job") {
        for job in jobs {
            print_job_summary(&job);
        }
    }

    Ok(())
}

/// Print a job summary
fn print_job_summary(job: &JobModel) {
    println!("  {} Job {}", "▸".cyan(), job.id.dimmed());
    println!("    Task:     {}", job.task_id.dimmed());
    println!("    Status:   {}", colorize_status(&job.status));
    println!(
        "    Created:  {}",
        job.creation_date
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Print detailed job information
fn print_job_details(job: &JobModel) {
    println!("{}", "Job Details:".bold());
    println!("  ID:          {}", job.id.cyan());
    println!("  Task ID:     {}", job.task_id.dimmed());
    println!("  Status:      {}", colorize_status(&job.status));
    println!(
        "  Created:     {}",
        job.creation_date.format("%Y-%m-%d %H:%M:%S")
    );
    if job.force {
        println!("  Forced:      {}", "yes".yellow());
    }

    if !job.stacktrace.is_empty() {
        println!("\n{}", "Stacktrace:".bold());
        for line in &job.stacktrace {
            println!("{}", line.red());
        }
    }
}

/// Colorize job status for display
fn colorize_status(status: &JobStatus) -> ColoredString {
    let status_str = format!("{:?}", status).to_uppercase();
    match status {
        JobStatus::Submitted | JobStatus::Pending | JobStatus::Blocked => status_str.yellow(),
        JobStatus::Running => status_str.cyan(),
        JobStatus::Completed | JobStatus::Skipped => status_str.green(),
        JobStatus::Failed => status_str.red(),
        JobStatus::Canceled => status_str.dimmed(),
    }
}
