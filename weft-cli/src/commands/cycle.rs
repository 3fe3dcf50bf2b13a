//! Cycle command handlers

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use clap::Subcommand;
use colored::*;
use weft_client::WeftClient;
use weft_core::domain::cycle::Frequency;
use weft_core::dto::{CreateCycle, CycleModel};

use super::{print_list_header, print_properties, print_success};

/// Cycle subcommands
#[derive(Subcommand)]
pub enum CycleCommands {
    /// List all cycles
    List,
    /// Get cycle details
    Get {
        /// Cycle ID
        id: String,
    },
    /// Delete a cycle
    Delete {
        /// Cycle ID
        id: String,
    },
    /// Create a cycle
    Create {
        /// DAILY, WEEKLY, MONTHLY or YEARLY
        #[arg(short, long)]
        frequency: Frequency,

        /// Start of the cycle (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
        #[arg(short, long, value_parser = parse_datetime)]
        start: NaiveDateTime,

        /// End of the cycle (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
        #[arg(short, long, value_parser = parse_datetime)]
        end: NaiveDateTime,

        /// Cycle name; generated by the server when omitted
        #[arg(short, long)]
        name: Option<String>,
    },
}

/// Handle cycle commands
pub async fn handle_cycle_command(command: CycleCommands, client: &WeftClient) -> Result<()> {
    match command {
        CycleCommands::List => list_cycles(client).await,
        CycleCommands::Get { id } => {
            let cycle = client.get_cycle(&id).await?;
            print_cycle_details(&cycle);
            Ok(())
        }
        CycleCommands::Delete { id } => {
            print_success(&client.delete_cycle(&id).await?);
            Ok(())
        }
        CycleCommands::Create {
            frequency,
            start,
            end,
            name,
        } => {
            if end < start {
                anyhow::bail!("End date must not be before start date");
            }
            let cycle = client
                .create_cycle(&CreateCycle {
                    id: None,
                    name,
                    frequency,
                    properties: Default::default(),
                    creation_date: Utc::now().naive_utc(),
                    start_date: start,
                    end_date: end,
                })
                .await?;
            print_success("Cycle created");
            print_cycle_details(&cycle);
            Ok(())
        }
    }
}

/// Accept a full timestamp or a bare date (midnight)
fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    if let Ok(datetime) = s.parse::<NaiveDateTime>() {
        return Ok(datetime);
    }
    s.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("'{}' is not a date or datetime", s))
}

async fn list_cycles(client: &WeftClient) -> Result<()> {
    let cycles = client.list_cycles().await?;

    if print_list_header(cycles.len(), "cycle") {
        for cycle in cycles {
            println!("  {} Cycle {}", "▸".cyan(), cycle.id.dimmed());
            println!("    Name:      {}", cycle.name);
            println!("    Frequency: {}", cycle.frequency.to_string().cyan());
            println!(
                "    Window:    {} → {}",
                cycle.start_date.format("%Y-%m-%d %H:%M:%S"),
                cycle.end_date.format("%Y-%m-%d %H:%M:%S")
            );
            println!();
        }
    }

    Ok(())
}

fn print_cycle_details(cycle: &CycleModel) {
    println!("{}", "Cycle Details:".bold());
    println!("  ID:          {}", cycle.id.cyan());
    println!("  Name:        {}", cycle.name);
    println!("  Frequency:   {}", cycle.frequency);
    println!(
        "  Created:     {}",
        cycle.creation_date.format("%Y-%m-%d %H:%M:%S")
    );
    println!("  Start:       {}", cycle.start_date.format("%Y-%m-%d %H:%M:%S"));
    println!("  End:         {}", cycle.end_date.format("%Y-%m-%d %H:%M:%S"));
    print_properties(&cycle.properties);
}
