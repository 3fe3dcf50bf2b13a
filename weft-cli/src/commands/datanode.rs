//! Data node command handlers
//!
//! Besides the usual management commands, data nodes can be read (optionally
//! filtered) and written from the command line.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde_json::Value;
use weft_client::WeftClient;
use weft_core::domain::filter::{Condition, Filter, JoinOperator};
use weft_core::dto::DataNodeModel;

use super::{print_ids, print_list_header, print_properties, print_success};

/// Data node subcommands
#[derive(Subcommand)]
pub enum DataNodeCommands {
    /// List all data nodes
    List,
    /// Get data node details
    Get {
        /// Data node ID
        id: String,
    },
    /// Delete a data node
    Delete {
        /// Data node ID
        id: String,
    },
    /// Get or create the data node of a configuration
    Create {
        /// Data node configuration ID
        config_id: String,
    },
    /// Read the content of a data node
    Read {
        /// Data node ID
        id: String,

        /// Condition as KEY:OPERATOR:VALUE, e.g. amount:GREATER_THAN:10
        #[arg(short, long, value_parser = parse_condition)]
        filter: Vec<Condition>,

        /// Keep records matching any condition instead of all
        #[arg(long)]
        or: bool,
    },
    /// Replace the content of a data node
    Write {
        /// Data node ID
        id: String,

        /// New content as JSON
        data: String,
    },
}

/// Handle data node commands
pub async fn handle_data_node_command(
    command: DataNodeCommands,
    client: &WeftClient,
) -> Result<()> {
    match command {
        DataNodeCommands::List => list_data_nodes(client).await,
        DataNodeCommands::Get { id } => {
            let data_node = client.get_data_node(&id).await?;
            print_data_node_details(&data_node);
            Ok(())
        }
        DataNodeCommands::Delete { id } => {
            print_success(&client.delete_data_node(&id).await?);
            Ok(())
        }
        DataNodeCommands::Create { config_id } => {
            let data_node = client.create_data_node(&config_id).await?;
            print_success("Data node was created.");
            print_data_node_details(&data_node);
            Ok(())
        }
        DataNodeCommands::Read { id, filter, or } => {
            let filter = Filter {
                conditions: filter,
                join: if or { JoinOperator::Or } else { JoinOperator::And },
            };
            let filter = (!filter.is_empty()).then_some(filter);
            let data = client.read_data_node(&id, filter.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
        DataNodeCommands::Write { id, data } => {
            let data: Value = serde_json::from_str(&data).context("Content is not valid JSON")?;
            print_success(&client.write_data_node(&id, &data).await?);
            Ok(())
        }
    }
}

/// Parse `KEY:OPERATOR:VALUE`; the value is read as JSON, falling back to a
/// plain string.
fn parse_condition(s: &str) -> Result<Condition, String> {
    let mut parts = s.splitn(3, ':');
    let (Some(key), Some(operator), Some(value)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("'{}' is not KEY:OPERATOR:VALUE", s));
    };
    if key.is_empty() {
        return Err("Condition key is empty".to_string());
    }

    Ok(Condition {
        key: key.to_string(),
        value: serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string())),
        operator: operator.parse()?,
    })
}

async fn list_data_nodes(client: &WeftClient) -> Result<()> {
    let data_nodes = client.list_data_nodes().await?;

    if print_list_header(data_nodes.len(), "data node") {
        for dn in data_nodes {
            println!("  {} Data node {}", "▸".cyan(), dn.id.dimmed());
            println!("    Config:  {}", dn.config_id);
            println!("    Storage: {}", dn.storage_type.as_str());
            println!();
        }
    }

    Ok(())
}

fn print_data_node_details(dn: &DataNodeModel) {
    println!("{}", "Data Node Details:".bold());
    println!("  ID:          {}", dn.id.cyan());
    println!("  Config ID:   {}", dn.config_id);
    println!("  Name:        {}", dn.name);
    println!("  Storage:     {}", dn.storage_type.as_str());
    println!("  Scope:       {:?}", dn.scope);
    if let Some(parent) = &dn.parent_id {
        println!("  Parent:      {}", parent.dimmed());
    }
    match dn.last_edit_date {
        Some(edited) => println!("  Last edit:   {}", edited.format("%Y-%m-%d %H:%M:%S")),
        None => println!("  Last edit:   {}", "never written".yellow()),
    }
    if dn.edit_in_progress {
        println!("  {}", "Edit in progress".yellow());
    }
    print_ids("Jobs:", &dn.job_ids);
    print_properties(&dn.properties);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use weft_core::domain::filter::Operator;

    #[test]
    fn test_parse_condition() {
        let condition = parse_condition("amount:greater_than:10").unwrap();
        assert_eq!(condition.key, "amount");
        assert_eq!(condition.operator, Operator::GreaterThan);
        assert_eq!(condition.value, json!(10));

        let condition = parse_condition("city:EQUAL:Paris:Nord").unwrap();
        assert_eq!(condition.value, json!("Paris:Nord"));
    }

    #[test]
    fn test_parse_condition_errors() {
        assert!(parse_condition("amount:10").is_err());
        assert!(parse_condition(":EQUAL:1").is_err());
        assert!(parse_condition("a:LIKE:1").is_err());
    }
}
