//! Router integration tests.
//!
//! These drive the full router, middleware included, against the in-memory
//! engine.

mod common;

use axum::http::StatusCode;
use common::{TestRequest, app, create, secured_app};
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = TestRequest::get("/health").send(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}

#[tokio::test]
async fn test_collections_start_empty() {
    let app = app();
    for collection in ["cycles", "datanodes", "tasks", "pipelines", "scenarios", "jobs"] {
        let (status, body) = TestRequest::get(&format!("/api/v1/{}", collection))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::OK, "{}", collection);
        assert_eq!(body, json!([]), "{}", collection);
    }
}

#[tokio::test]
async fn test_create_requires_config_id() {
    let app = app();
    for uri in ["/api/v1/pipelines", "/api/v1/tasks?config_id=", "/api/v1/datanodes?other=1"] {
        let (status, body) = TestRequest::post(uri).send(&app).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body, json!({"message": "Config Id is mandatory"}));
    }
}

#[tokio::test]
async fn test_create_unknown_config() {
    let app = app();
    let (status, body) = TestRequest::post("/api/v1/scenarios?config_id=weekly")
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Scenario config weekly not found"}));
}

#[tokio::test]
async fn test_create_pipeline_is_idempotent() {
    let app = app();

    let (status, body) = TestRequest::post("/api/v1/pipelines?config_id=doubling")
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Pipeline was created.");
    assert_eq!(body["pipeline"]["config_id"], "doubling");
    let first = body["pipeline"]["id"].clone();

    let second = create(&app, "pipelines", "pipeline", "doubling").await;
    assert_eq!(first, json!(second));

    let (_, body) = TestRequest::get("/api/v1/pipelines").send(&app).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // the pipeline brought its task and data nodes with it
    let (_, tasks) = TestRequest::get("/api/v1/tasks").send(&app).await;
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["parent_id"], first);
    let (_, data_nodes) = TestRequest::get("/api/v1/datanodes").send(&app).await;
    assert_eq!(data_nodes.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_and_delete() {
    let app = app();
    let id = create(&app, "tasks", "task", "double").await;

    let (status, body) = TestRequest::get(&format!("/api/v1/tasks/{}", id))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["id"], id.as_str());
    assert_eq!(body["task"]["function_name"], "double");

    let (status, body) = TestRequest::delete(&format!("/api/v1/tasks/{}", id))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"msg": format!("task {} deleted", id)}));

    let (status, body) = TestRequest::get(&format!("/api/v1/tasks/{}", id))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": format!("Task {} not found", id)}));

    let (status, _) = TestRequest::delete(&format!("/api/v1/tasks/{}", id))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_every_kind_deletes_then_not_found() {
    let app = app();
    let scenario = create(&app, "scenarios", "scenario", "monthly").await;
    let (status, _) = TestRequest::post(&format!("/api/v1/scenarios/submit/{}", scenario))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::OK);

    let collections = ["cycles", "datanodes", "tasks", "pipelines", "scenarios", "jobs"];
    let mut existing = Vec::new();
    for collection in collections {
        let (_, body) = TestRequest::get(&format!("/api/v1/{}", collection))
            .send(&app)
            .await;
        let id = body[0]["id"].as_str().unwrap().to_string();
        existing.push((collection, id));
    }

    for (collection, id) in existing {
        let uri = format!("/api/v1/{}/{}", collection, id);

        let (status, _) = TestRequest::get(&uri).send(&app).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);

        let (status, body) = TestRequest::delete(&uri).send(&app).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(body["msg"].as_str().unwrap().ends_with(&format!("{} deleted", id)));

        let (status, body) = TestRequest::get(&uri).send(&app).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert!(body["message"].as_str().unwrap().contains(&id), "{}", uri);

        let (status, _) = TestRequest::delete(&uri).send(&app).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }

    for collection in collections {
        let uri = format!("/api/v1/{}/NOPE_1", collection);
        let (status, body) = TestRequest::get(&uri).send(&app).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert!(body["message"].as_str().unwrap().contains("NOPE_1"), "{}", uri);

        let (status, _) = TestRequest::delete(&uri).send(&app).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_daily_cycle_with_equal_dates() {
    let app = app();
    let (status, body) = TestRequest::post("/api/v1/cycles")
        .json(json!({
            "frequency": "DAILY",
            "properties": {},
            "creation_date": "2022-01-01T00:00:00",
            "start_date": "2022-01-01T00:00:00",
            "end_date": "2022-01-01T00:00:00"
        }))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["msg"], "Cycle created");
    assert_eq!(body["cycle"]["frequency"], "DAILY");
    assert_eq!(body["cycle"]["start_date"], body["cycle"]["end_date"]);

    let (_, cycles) = TestRequest::get("/api/v1/cycles").send(&app).await;
    assert_eq!(cycles.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cycle_lifecycle() {
    let app = app();

    let (status, body) = TestRequest::post("/api/v1/cycles")
        .json(json!({
            "name": "january",
            "frequency": "monthly",
            "properties": {"team": "ops"},
            "creation_date": "2020-01-01T00:00:00",
            "start_date": "2020-01-01T00:00:00",
            "end_date": "2020-01-31T23:59:59"
        }))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["msg"], "Cycle created");
    assert_eq!(body["cycle"]["frequency"], "MONTHLY");
    assert_eq!(body["cycle"]["name"], "january");
    assert_eq!(body["cycle"]["start_date"], "2020-01-01T00:00:00");
    let id = body["cycle"]["id"].as_str().unwrap().to_string();

    let (status, body) = TestRequest::get(&format!("/api/v1/cycles/{}", id))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cycle"]["properties"]["team"], "ops");

    let (status, body) = TestRequest::delete(&format!("/api/v1/cycles/{}", id))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], format!("cycle {} deleted", id));
}

#[tokio::test]
async fn test_cycle_validation() {
    let app = app();

    let (status, body) = TestRequest::post("/api/v1/cycles")
        .json(json!({"frequency": "fortnightly", "start_date": "2020-01-01T00:00:00"}))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["frequency"],
        json!(["Must be one of: DAILY, WEEKLY, MONTHLY, YEARLY."])
    );
    assert_eq!(body["creation_date"], json!(["Missing data for required field."]));
    assert_eq!(body["end_date"], json!(["Missing data for required field."]));
    assert!(body.get("start_date").is_none());

    let (status, body) = TestRequest::post("/api/v1/cycles").raw("\"daily\"").send(&app).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("_schema").is_some());

    let (_, body) = TestRequest::get("/api/v1/cycles").send(&app).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_scenario_creates_cycle() {
    let app = app();
    let (status, body) = TestRequest::post("/api/v1/scenarios?config_id=monthly")
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["scenario"]["primary_scenario"], true);
    let cycle_id = body["scenario"]["cycle"].as_str().unwrap().to_string();

    let (status, body) = TestRequest::get(&format!("/api/v1/cycles/{}", cycle_id))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cycle"]["frequency"], "MONTHLY");
}

#[tokio::test]
async fn test_submit_records_jobs() {
    let app = app();
    let id = create(&app, "scenarios", "scenario", "monthly").await;

    let (status, body) = TestRequest::post(&format!("/api/v1/scenarios/submit/{}", id))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Scenario {} was submitted.", id));

    let (_, jobs) = TestRequest::get("/api/v1/jobs").send(&app).await;
    let jobs = jobs.as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["status"], "SUBMITTED");

    for collection in ["tasks", "pipelines", "scenarios"] {
        let (status, _) = TestRequest::post(&format!("/api/v1/{}/submit/unknown", collection))
            .send(&app)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", collection);
    }
}

#[tokio::test]
async fn test_data_node_read_and_write() {
    let app = app();
    let id = create(&app, "datanodes", "datanode", "numbers").await;
    let read = format!("/api/v1/datanodes/{}/read", id);

    let (status, body) = TestRequest::get(&read).send(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, body) = TestRequest::get(&read)
        .json(json!({
            "operators": [
                {"key": "parity", "value": "odd", "operator": "EQUAL"},
                {"key": "n", "value": 1, "operator": "GREATER_THAN"}
            ],
            "join_operator": "AND"
        }))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([{"n": 3, "parity": "odd"}]));

    let (status, body) = TestRequest::get(&read)
        .json(json!({"operators": [{"key": "n", "value": 1, "operator": "ROUGHLY"}]}))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("operators.0.operator").is_some());

    let (status, body) = TestRequest::put(&format!("/api/v1/datanodes/{}/write", id))
        .json(json!([{"n": 10}]))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Data node {} was written.", id));

    let (_, body) = TestRequest::get(&read).send(&app).await;
    assert_eq!(body["data"], json!([{"n": 10}]));

    let (status, _) = TestRequest::put(&format!("/api/v1/datanodes/{}/write", id))
        .json(json!([1, 2, 3]))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = TestRequest::get(&read).send(&app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"data": [1, 2, 3]}));

    let (status, _) = TestRequest::get("/api/v1/datanodes/missing/read").send(&app).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_job_create_and_cancel() {
    let app = app();

    let (status, body) = TestRequest::post("/api/v1/jobs").send(&app).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Task Id is mandatory"}));

    let (status, body) = TestRequest::post("/api/v1/jobs?task_id=double").send(&app).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Job was created.");
    let id = body["job"]["id"].as_str().unwrap().to_string();

    let (status, body) = TestRequest::post(&format!("/api/v1/jobs/cancel/{}", id))
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Job {} was cancelled.", id));

    let (_, body) = TestRequest::get(&format!("/api/v1/jobs/{}", id)).send(&app).await;
    assert_eq!(body["job"]["status"], "CANCELED");

    let (status, _) = TestRequest::post("/api/v1/jobs/cancel/JOB_missing").send(&app).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_roles_enforced() {
    let app = secured_app();

    let (status, body) = TestRequest::get("/api/v1/tasks").send(&app).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"message": "Missing authorization token"}));

    let (status, _) = TestRequest::get("/api/v1/tasks").token("reader").send(&app).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = TestRequest::post("/api/v1/tasks?config_id=double")
        .token("reader")
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"message": "Forbidden"}));

    let (status, body) = TestRequest::post("/api/v1/tasks?config_id=double")
        .token("editor")
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["task"]["id"].as_str().unwrap().to_string();

    let submit = format!("/api/v1/tasks/submit/{}", id);
    let (status, _) = TestRequest::post(&submit).token("editor").send(&app).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = TestRequest::post(&submit).token("executor").send(&app).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = TestRequest::delete(&format!("/api/v1/tasks/{}", id))
        .token("unknown")
        .send(&app)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // health stays open
    let (status, _) = TestRequest::get("/health").send(&app).await;
    assert_eq!(status, StatusCode::OK);
}
