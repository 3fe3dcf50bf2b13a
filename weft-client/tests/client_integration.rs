//! Client integration tests.
//!
//! Each test starts the real router on an ephemeral port backed by the
//! in-memory engine and talks to it over HTTP.

use anyhow::Result;
use chrono::NaiveDateTime;
use serde_json::json;
use weft_client::WeftClient;
use weft_core::config::Configuration;
use weft_core::domain::cycle::Frequency;
use weft_core::domain::filter::{Condition, Filter, JoinOperator, Operator};
use weft_core::domain::job::JobStatus;
use weft_core::dto::CreateCycle;
use weft_core::engine::Engine;
use weft_rest::{AppState, create_router};

const CONFIG: &str = r#"{
    "data_nodes": {
        "sales": { "properties": { "default_data": [
            {"region": "north", "amount": 120},
            {"region": "south", "amount": 80},
            {"region": "north", "amount": 40}
        ] } },
        "report": {}
    },
    "tasks": {
        "summarize": { "inputs": ["sales"], "outputs": ["report"], "function_name": "summarize", "function_module": "reports" }
    },
    "pipelines": { "reporting": { "tasks": ["summarize"] } },
    "scenarios": { "quarterly": { "pipelines": ["reporting"] } }
}"#;

async fn start_server() -> Result<WeftClient> {
    let engine = Engine::in_memory(Configuration::from_json_str(CONFIG)?);
    let app = create_router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(WeftClient::new(format!("http://{}", addr)))
}

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let client = start_server().await?;
    client.health().await?;
    Ok(())
}

#[tokio::test]
async fn test_scenario_flow() -> Result<()> {
    let client = start_server().await?;

    let scenario = client.create_scenario("quarterly").await?;
    assert_eq!(scenario.config_id, "quarterly");
    assert_eq!(scenario.pipeline_ids.len(), 1);
    assert!(scenario.cycle.is_none());

    let again = client.create_scenario("quarterly").await?;
    assert_eq!(again.id, scenario.id);

    let message = client.submit_scenario(&scenario.id).await?;
    assert_eq!(message, format!("Scenario {} was submitted.", scenario.id));

    let jobs = client.list_jobs().await?;
    assert_eq!(jobs.len(), 1);
    let job = client.get_job(&jobs[0].id).await?;
    assert_eq!(job.status, JobStatus::Submitted);

    client.cancel_job(&job.id).await?;
    assert_eq!(client.get_job(&job.id).await?.status, JobStatus::Canceled);

    let message = client.delete_scenario(&scenario.id).await?;
    assert_eq!(message, format!("scenario {} deleted", scenario.id));
    assert!(client.list_scenarios().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_errors_carry_status_and_message() -> Result<()> {
    let client = start_server().await?;

    let err = client.get_task("TASK_missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "API error (status 404): Task TASK_missing not found"
    );

    let err = client.create_pipeline("").await.unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(err.status(), Some(400));

    let err = client.create_job("nope").await.unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[tokio::test]
async fn test_cycles() -> Result<()> {
    let client = start_server().await?;

    let cycle = client
        .create_cycle(&CreateCycle {
            id: None,
            name: Some("q1".to_string()),
            frequency: Frequency::Yearly,
            properties: Default::default(),
            creation_date: ts("2021-01-01T00:00:00"),
            start_date: ts("2021-01-01T00:00:00"),
            end_date: ts("2021-12-31T23:59:59"),
        })
        .await?;
    assert_eq!(cycle.name, "q1");
    assert_eq!(cycle.frequency, Frequency::Yearly);

    assert_eq!(client.get_cycle(&cycle.id).await?, cycle);
    assert_eq!(client.list_cycles().await?.len(), 1);

    client.delete_cycle(&cycle.id).await?;
    assert!(client.get_cycle(&cycle.id).await.unwrap_err().is_not_found());
    Ok(())
}

#[tokio::test]
async fn test_data_node_content() -> Result<()> {
    let client = start_server().await?;
    let task = client.create_task("summarize").await?;
    assert_eq!(client.list_data_nodes().await?.len(), 2);

    let sales = &task.input_ids[0];
    let filter = Filter {
        conditions: vec![Condition {
            key: "region".to_string(),
            value: json!("north"),
            operator: Operator::Equal,
        }],
        join: JoinOperator::And,
    };
    let north = client.read_data_node(sales, Some(&filter)).await?;
    assert_eq!(north.as_array().map(Vec::len), Some(2));

    let report = &task.output_ids[0];
    assert_eq!(client.read_data_node(report, None).await?, json!(null));

    client.write_data_node(report, &json!({"north": 160})).await?;
    assert_eq!(
        client.read_data_node(report, None).await?,
        json!({"north": 160})
    );
    assert!(client.get_data_node(report).await?.last_edit_date.is_some());
    Ok(())
}
