//! Scenario command handlers

use anyhow::Result;
use colored::*;
use weft_client::WeftClient;
use weft_core::dto::ScenarioModel;

use super::{ExecutableCommands, print_ids, print_list_header, print_properties, print_success};

/// Handle scenario commands
pub async fn handle_scenario_command(
    command: ExecutableCommands,
    client: &WeftClient,
) -> Result<()> {
    match command {
        ExecutableCommands::List => {
            let scenarios = client.list_scenarios().await?;
            if print_list_header(scenarios.len(), "scenario") {
                for scenario in scenarios {
                    let primary = if scenario.primary_scenario {
                        " (primary)".green()
                    } else {
                        "".normal()
                    };
                    println!(
                        "  {} Scenario {}{}",
                        "▸".cyan(),
                        scenario.id.dimmed(),
                        primary
                    );
                    println!("    Config:  {}", scenario.config_id);
                    println!(
                        "    Created: {}",
                        scenario.creation_date.format("%Y-%m-%d %H:%M:%S")
                    );
                    println!();
                }
            }
        }
        ExecutableCommands::Get { id } => {
            print_scenario_details(&client.get_scenario(&id).await?)
        }
        ExecutableCommands::Delete { id } => print_success(&client.delete_scenario(&id).await?),
        ExecutableCommands::Create { config_id } => {
            let scenario = client.create_scenario(&config_id).await?;
            print_success("Scenario was created.");
            print_scenario_details(&scenario);
        }
        ExecutableCommands::Submit { id } => print_success(&client.submit_scenario(&id).await?),
    }

    Ok(())
}

fn print_scenario_details(scenario: &ScenarioModel) {
    println!("{}", "Scenario Details:".bold());
    println!("  ID:          {}", scenario.id.cyan());
    println!("  Config ID:   {}", scenario.config_id);
    println!(
        "  Created:     {}",
        scenario.creation_date.format("%Y-%m-%d %H:%M:%S")
    );
    match &scenario.cycle {
        Some(cycle) => println!("  Cycle:       {}", cycle.dimmed()),
        None => println!("  Cycle:       {}", "-".dimmed()),
    }
    println!(
        "  Primary:     {}",
        if scenario.primary_scenario {
            "✓".green()
        } else {
            "✗".dimmed()
        }
    );
    if !scenario.tags.is_empty() {
        println!("  Tags:        {}", scenario.tags.join(", "));
    }
    print_ids("Pipelines:", &scenario.pipeline_ids);
    print_properties(&scenario.properties);
}
