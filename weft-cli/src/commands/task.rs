//! Task command handlers

use anyhow::Result;
use colored::*;
use weft_client::WeftClient;
use weft_core::dto::TaskModel;

use super::{ExecutableCommands, print_ids, print_list_header, print_success};

/// Handle task commands
pub async fn handle_task_command(command: ExecutableCommands, client: &WeftClient) -> Result<()> {
    match command {
        ExecutableCommands::List => {
            let tasks = client.list_tasks().await?;
            if print_list_header(tasks.len(), "task") {
                for task in tasks {
                    println!("  {} Task {}", "▸".cyan(), task.id.dimmed());
                    println!("    Config:   {}", task.config_id);
                    println!(
                        "    Function: {}.{}",
                        task.function_module, task.function_name
                    );
                    println!();
                }
            }
        }
        ExecutableCommands::Get { id } => print_task_details(&client.get_task(&id).await?),
        ExecutableCommands::Delete { id } => print_success(&client.delete_task(&id).await?),
        ExecutableCommands::Create { config_id } => {
            let task = client.create_task(&config_id).await?;
            print_success("Task was created.");
            print_task_details(&task);
        }
        ExecutableCommands::Submit { id } => {
            print_success(&client.submit_task(&id).await?);
            println!("{}", "  Follow progress with `weft job list`".dimmed());
        }
    }

    Ok(())
}

fn print_task_details(task: &TaskModel) {
    println!("{}", "Task Details:".bold());
    println!("  ID:          {}", task.id.cyan());
    println!("  Config ID:   {}", task.config_id);
    if let Some(parent) = &task.parent_id {
        println!("  Parent:      {}", parent.dimmed());
    }
    println!(
        "  Function:    {}.{}",
        task.function_module, task.function_name
    );
    print_ids("Inputs:", &task.input_ids);
    print_ids("Outputs:", &task.output_ids);
}
