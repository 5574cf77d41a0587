// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, tool_call, ScriptedLlm, API_KEY};
use axum::http::StatusCode;
use serde_json::{json, Value};
use solvrs::domain::models::graph::GraphSnapshot;
use solvrs::domain::repositories::storage_repository::StorageRepository;
use solvrs::domain::services::llm_service::AssistantReply;
use solvrs::infrastructure::storage::InMemoryStorage;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_datacenter_agent_reports_ids() {
    let llm = ScriptedLlm::new(vec![
        tool_call("call_1", "makeRequest", json!({"query": "show tables"})),
        AssistantReply::text("Znalazłem:\n```json\n{\"ids\": [4278, 9294]}\n```"),
    ]);
    let app = create_test_app(llm, InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/apidb"))
        .and(body_json(json!({
            "task": "database",
            "apikey": API_KEY,
            "query": "show tables"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reply": [{"Tables_in_banan": "datacenters"}, {"Tables_in_banan": "users"}],
            "error": "OK"
        })))
        .expect(1)
        .mount(&app.remote)
        .await;
    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_json(json!({
            "task": "database",
            "apikey": API_KEY,
            "answer": [4278, 9294]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "{FLG:DC}"})),
        )
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/303").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"]["message"], "{FLG:DC}");
    assert_eq!(app.llm.prompts().len(), 2);
    assert!(app
        .llm
        .models()
        .iter()
        .all(|model| model.as_deref() == Some("gpt-4o-mini")));
}

#[tokio::test]
async fn test_agent_gives_up_after_max_steps() {
    let calls = (0..10)
        .map(|i| tool_call(&format!("call_{}", i), "makeRequest", json!({"query": "show tables"})))
        .collect();
    let app = create_test_app(ScriptedLlm::new(calls), InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/apidb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": [], "error": "OK"})))
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/304").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("max steps (10) reached"));
    assert_eq!(app.llm.models(), vec![Some("gpt-4o".to_string()); 10]);
}

#[tokio::test]
async fn test_users_snapshot_is_written_to_storage() {
    let llm = ScriptedLlm::new(vec![
        tool_call("call_1", "makeRequest", json!({"query": "select * from users"})),
        AssistantReply::text(
            "```json\n{\"users\": [{\"userId\": 1, \"name\": \"Rafał\", \"knows\": [2]}, \
             {\"userId\": 2, \"name\": \"Barbara\", \"knows\": []}]}\n```",
        ),
    ]);
    let app = create_test_app(llm, InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/apidb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reply": [{"id": "1", "username": "Rafał"}, {"id": "2", "username": "Barbara"}],
            "error": "OK"
        })))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.post("/api/305/snapshot").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"]["users"][0]["name"], "Rafał");

    let saved = app.storage.get("305/database.json").await.unwrap().unwrap();
    let snapshot: GraphSnapshot = serde_json::from_slice(&saved).unwrap();
    assert_eq!(snapshot.users.len(), 2);
    assert_eq!(snapshot.users[0].knows, vec![2]);
    assert_eq!(snapshot.edge_count(), 1);
}

#[tokio::test]
async fn test_gps_agent_collects_coordinates_and_reports() {
    let llm = ScriptedLlm::new(vec![
        tool_call("call_1", "getUsersByPlace", json!({"place": "LUBAWA"})),
        tool_call("call_2", "getCharacterLocation", json!({"userID": 28})),
        tool_call(
            "call_3",
            "sendReport",
            json!({"answer": {"Azazel": {"lat": 53.50, "lon": 19.75}}}),
        ),
        AssistantReply::text("Raport wysłany"),
    ]);
    let app = create_test_app(llm, InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/places"))
        .and(body_json(json!({"query": "LUBAWA", "apikey": API_KEY})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "RAFAL AZAZEL"
        })))
        .expect(1)
        .mount(&app.remote)
        .await;
    Mock::given(method("POST"))
        .and(path("/gps"))
        .and(body_json(json!({"userID": 28})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": {"lat": 53.50, "lon": 19.75}
        })))
        .expect(1)
        .mount(&app.remote)
        .await;
    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_json(json!({
            "task": "gps",
            "apikey": API_KEY,
            "answer": {"Azazel": {"lat": 53.50, "lon": 19.75}}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "{FLG:GPS}"})),
        )
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/502").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"data": "Raport wysłany"}));
    assert_eq!(app.llm.prompts().len(), 4);
}

#[tokio::test]
async fn test_photo_agent_reports_through_tool() {
    let llm = ScriptedLlm::new(vec![
        tool_call("call_1", "makeRequest", json!({"message": "START"})),
        AssistantReply::text("```json\n{\"description\": \"Barbara ma czarne włosy\"}\n```"),
    ]);
    let app = create_test_app(llm, InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_partial_json(json!({"task": "photos", "answer": "START"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 0, "message": "IMG_559.PNG IMG_1410.PNG"})),
        )
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/401").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"data": {"description": "Barbara ma czarne włosy"}})
    );
}

#[tokio::test]
async fn test_site_navigator_answers_questions() {
    let llm = ScriptedLlm::new(vec![
        tool_call("call_1", "readContext", json!({})),
        AssistantReply::text("```json\n{\"01\": \"2019\", \"02\": \"BNW-01\"}\n```"),
    ]);
    let app = create_test_app(llm, InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_partial_json(json!({
            "task": "notes",
            "answer": {"01": "2019", "02": "BNW-01"}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "{FLG:NOTES}"})),
        )
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app
        .server
        .post("/api/405")
        .json(&json!({
            "01": "W którym roku powstał model BNW-01?",
            "02": "Jak nazywa się model?"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"]["message"], "{FLG:NOTES}");
    assert!(app.llm.prompts()[0].contains("W którym roku powstał model BNW-01?"));
}

#[tokio::test]
async fn test_site_navigator_rejects_empty_questions() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app.server.post("/api/405").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.llm.prompts().is_empty());
}

#[tokio::test]
async fn test_site_navigator_rejects_non_string_questions() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app
        .server
        .post("/api/405")
        .json(&json!({"01": 42}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
    assert!(app.llm.prompts().is_empty());
}

#[tokio::test]
async fn test_phone_requires_database() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app.server.get("/api/501").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("database.url"));
}
