//! Pipeline command handlers

use anyhow::Result;
use colored::*;
use weft_client::WeftClient;
use weft_core::dto::PipelineModel;

use super::{ExecutableCommands, print_ids, print_list_header, print_properties, print_success};

/// Handle pipeline commands
pub async fn handle_pipeline_command(
    command: ExecutableCommands,
    client: &WeftClient,
) -> Result<()> {
    match command {
        ExecutableCommands::List => {
            let pipelines = client.list_pipelines().await?;
            if print_list_header(pipelines.len(), "pipeline") {
                for pipeline in pipelines {
                    println!("  {} Pipeline {}", "▸".cyan(), pipeline.id.dimmed());
                    println!("    Config: {}", pipeline.config_id);
                    println!("    Tasks:  {}", pipeline.task_ids.len());
                    println!();
                }
            }
        }
        ExecutableCommands::Get { id } => {
            print_pipeline_details(&client.get_pipeline(&id).await?)
        }
        ExecutableCommands::Delete { id } => print_success(&client.delete_pipeline(&id).await?),
        ExecutableCommands::Create { config_id } => {
            let pipeline = client.create_pipeline(&config_id).await?;
            print_success("Pipeline was created.");
            print_pipeline_details(&pipeline);
        }
        ExecutableCommands::Submit { id } => print_success(&client.submit_pipeline(&id).await?),
    }

    Ok(())
}

fn print_pipeline_details(pipeline: &PipelineModel) {
    println!("{}", "Pipeline Details:".bold());
    println!("  ID:          {}", pipeline.id.cyan());
    println!("  Config ID:   {}", pipeline.config_id);
    if let Some(parent) = &pipeline.parent_id {
        println!("  Parent:      {}", parent.dimmed());
    }
    print_ids("Tasks:", &pipeline.task_ids);
    print_properties(&pipeline.properties);
}
