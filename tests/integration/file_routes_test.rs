// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    create_test_app, create_test_app_with_documents, InMemoryDocuments, ScriptedLlm, API_KEY,
};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde_json::{json, Value};
use solvrs::domain::models::document::ScoredDocument;
use solvrs::domain::repositories::storage_repository::StorageRepository;
use solvrs::infrastructure::storage::InMemoryStorage;
use std::sync::Arc;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn ok_reply(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": message}))
}

#[tokio::test]
async fn test_calibration_fixes_sums_and_answers_open_questions() {
    let instructions = json!({
        "apikey": "%PUT-YOUR-API-KEY-HERE%",
        "description": "calibration",
        "copyright": "Copyright (C) 2238 by BanAN Technologies Inc.",
        "test-data": [
            {"question": "1 + 1", "answer": 3},
            {"question": "2 + 2", "answer": 4, "test": {"q": "capital city of Poland?", "a": "???"}}
        ]
    });
    let storage = InMemoryStorage::new()
        .with_file("3/instructions.json", instructions.to_string())
        .await;
    let app = create_test_app(ScriptedLlm::texts(&[" Warsaw \n"]), storage).await;

    Mock::given(method("POST"))
        .and(path("/report"))
        .respond_with(ok_reply("{FLG:CALIBRATED}"))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/3").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"data": {"code": 0, "message": "{FLG:CALIBRATED}"}})
    );

    let requests = app.remote.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["task"], "JSON");
    assert_eq!(sent["answer"]["apikey"], API_KEY);
    assert_eq!(sent["answer"]["test-data"][0]["answer"], 2);
    assert_eq!(sent["answer"]["test-data"][1]["test"]["a"], "Warsaw");
    assert_eq!(app.llm.models(), vec![Some("gpt-4o-mini".to_string())]);
}

#[tokio::test]
async fn test_calibration_without_input_file_fails() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app.server.get("/api/3").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("3/instructions.json"));
}

#[tokio::test]
async fn test_interrogation_reports_deduced_street() {
    let storage = InMemoryStorage::new()
        .with_file("6/audio/adam.m4a", b"audio")
        .await
        .with_file("6/transcripts/rafal.txt", "Andrzej pracował na uczelni")
        .await;
    let app = create_test_app(ScriptedLlm::texts(&["  ul. Łojasiewicza\n"]), storage).await;

    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_json(json!({
            "task": "mp3",
            "apikey": API_KEY,
            "answer": "ul. Łojasiewicza"
        })))
        .respond_with(ok_reply("{FLG:STREET}"))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/6").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let prompt = &app.llm.prompts()[0];
    assert!(prompt.contains("transcript of adam.m4a"));
    assert!(prompt.contains("Andrzej pracował na uczelni"));
}

#[tokio::test]
async fn test_categorize_groups_files_by_content() {
    let storage = InMemoryStorage::new()
        .with_file("8/audio/rec1.mp3", b"audio")
        .await
        .with_file("8/images/img1.png", b"png")
        .await
        .with_file("8/texts/note1.txt", "The weather was calm all day.")
        .await;
    let llm = ScriptedLlm::responding(|prompt| {
        if prompt.contains("transcript text from image") {
            return "Technician welded a new antenna.".to_string();
        }
        let payload = prompt.split("<text>").nth(1).unwrap_or_default();
        if payload.contains("rec1.mp3") {
            "people".to_string()
        } else if payload.contains("welded") {
            "hardware".to_string()
        } else {
            "0".to_string()
        }
    });
    let app = create_test_app(llm, storage).await;

    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_partial_json(json!({
            "task": "kategorie",
            "answer": {"people": ["rec1.mp3"], "hardware": ["img1.png"]}
        })))
        .respond_with(ok_reply("{FLG:SORTED}"))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/8").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"data": {"code": 0, "message": "{FLG:SORTED}"}})
    );
}

#[tokio::test]
async fn test_arxiv_notes_are_served() {
    let storage = InMemoryStorage::new()
        .with_file("9/notes.md", "# Notatki\n\nRafał zostawił notatkę.")
        .await;
    let app = create_test_app(ScriptedLlm::texts(&[]), storage).await;

    let response = app.server.get("/api/9").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"data": "# Notatki\n\nRafał zostawił notatkę."})
    );
}

#[tokio::test]
async fn test_arxiv_notes_missing_file() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app.server.get("/api/9").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("9/notes.md"));
}

#[tokio::test]
async fn test_keywords_builds_facts_metadata_once() {
    let storage = InMemoryStorage::new()
        .with_file("301/facts/f01.txt", "Fact one")
        .await
        .with_file("301/facts/f02.txt", "Fact two")
        .await
        .with_file("301/reports/r1-sektor_C4.txt", "Schwytano nauczyciela.")
        .await;
    let app = create_test_app(
        ScriptedLlm::texts(&[r#"{"r1-sektor_C4.txt": "C4, nauczyciel, schwytany"}"#]),
        storage,
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_partial_json(json!({
            "task": "dokumenty",
            "answer": {"r1-sektor_C4.txt": "C4, nauczyciel, schwytany"}
        })))
        .respond_with(ok_reply("{FLG:KEYWORDS}"))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/301").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let metadata = app.storage.get("301/facts/metadata.json").await.unwrap().unwrap();
    let metadata: Value = serde_json::from_slice(&metadata).unwrap();
    assert_eq!(metadata, json!(["Fact one", "Fact two"]));
    assert_eq!(
        app.llm.prompts(),
        vec![r#"{"r1-sektor_C4.txt":"Schwytano nauczyciela."}"#.to_string()]
    );
}

#[tokio::test]
async fn test_graph_import_commits_snapshot() {
    let snapshot = json!({
        "users": [
            {"userId": 1, "name": "Rafał", "knows": [2]},
            {"userId": 2, "name": "Barbara", "knows": []}
        ]
    });
    let storage = InMemoryStorage::new()
        .with_file("305/database.json", snapshot.to_string())
        .await;
    let app = create_test_app(ScriptedLlm::texts(&[]), storage).await;

    Mock::given(method("POST"))
        .and(path("/db/neo4j/tx/commit"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"results": [], "errors": []})),
        )
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.post("/api/305/import").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"data": 1}));
}

#[tokio::test]
async fn test_connections_reports_shortest_path() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/db/neo4j/tx/commit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"columns": ["names"], "data": [{"row": [["Rafał", "Azazel", "Barbara"]]}]}],
            "errors": []
        })))
        .mount(&app.remote)
        .await;
    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_partial_json(json!({
            "task": "connections",
            "answer": "Rafał,Azazel,Barbara"
        })))
        .respond_with(ok_reply("{FLG:PATH}"))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/305").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"]["message"], "{FLG:PATH}");
}

fn report_hit(title: &str, date: &str, similarity: f64) -> ScoredDocument {
    ScoredDocument {
        title: title.to_string(),
        description: format!("{} - szczegóły", title),
        date: Some(date.to_string()),
        similarity,
    }
}

#[tokio::test]
async fn test_vector_search_reports_best_match_date() {
    let documents = Arc::new(InMemoryDocuments::with_hits(vec![
        report_hit("Patrol sektora C", "2024-01-08", 0.87),
        report_hit("Kradzież prototypu broni", "2024-02-21", 0.93),
        report_hit("Awaria zasilania", "2024-03-02", 0.41),
    ]));
    let app = create_test_app_with_documents(
        ScriptedLlm::texts(&[]),
        InMemoryStorage::new(),
        Some(documents),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_json(json!({
            "task": "wektory",
            "apikey": API_KEY,
            "answer": "2024-02-21"
        })))
        .respond_with(ok_reply("{FLG:VECTOR}"))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/302").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"]["message"], "{FLG:VECTOR}");
}

#[tokio::test]
async fn test_vector_search_without_close_match_is_bad_request() {
    let documents = Arc::new(InMemoryDocuments::with_hits(vec![
        report_hit("Patrol sektora C", "2024-01-08", 0.85),
        report_hit("Awaria zasilania", "2024-03-02", 0.41),
    ]));
    let app = create_test_app_with_documents(
        ScriptedLlm::texts(&[]),
        InMemoryStorage::new(),
        Some(documents),
    )
    .await;

    let response = app.server.get("/api/302").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
    assert!(app.remote.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_report_index_parses_files_into_documents() {
    let storage = InMemoryStorage::new()
        .with_file(
            "302/reports/2024_02_21.txt",
            "Kradzież prototypu\n\nZ laboratorium zniknął prototyp broni.\n",
        )
        .await
        .with_file("302/reports/2024_01_08.txt", "Patrol sektora C\nBez zdarzeń.")
        .await;
    let documents = Arc::new(InMemoryDocuments::default());
    let app =
        create_test_app_with_documents(ScriptedLlm::texts(&[]), storage, Some(documents.clone()))
            .await;

    let response = app.server.post("/api/302/index").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"data": {"indexed": 2, "files": ["2024_01_08.txt", "2024_02_21.txt"]}})
    );

    let mut inserted = documents.inserted();
    inserted.sort_by(|a, b| a.date.cmp(&b.date));
    assert_eq!(inserted.len(), 2);
    assert_eq!(inserted[1].title, "Kradzież prototypu");
    assert_eq!(inserted[1].description, "Z laboratorium zniknął prototyp broni.");
    assert_eq!(inserted[1].date, NaiveDate::from_ymd_opt(2024, 2, 21));
    assert_eq!(inserted[1].embedding, vec![0.1, 0.2, 0.3]);
}
