// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, ScriptedLlm, API_KEY};
use axum::http::StatusCode;
use serde_json::{json, Value};
use solvrs::infrastructure::storage::InMemoryStorage;
use wiremock::matchers::{body_json, body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_poligon_reports_non_empty_lines() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    Mock::given(method("GET"))
        .and(path("/dane.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("abc\ndef\n\n"))
        .mount(&app.remote)
        .await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .and(body_json(json!({
            "task": "POLIGON",
            "apikey": API_KEY,
            "answer": ["abc", "def"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "OK"})))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/poligon").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"data": "OK"}));
}

#[tokio::test]
async fn test_poligon_failure_is_not_found() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    Mock::given(method("GET"))
        .and(path("/dane.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/poligon").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_login_form_falls_back_when_scrape_fails() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(
            ResponseTemplate::new(402)
                .set_body_json(json!({"success": false, "error": "Payment required"})),
        )
        .mount(&app.remote)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("username=tester"))
        .and(body_string_contains("answer=1945"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h2>{FLG:LOGIN}</h2>"))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/1").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"data": "<h2>{FLG:LOGIN}</h2>"}));
    assert!(app.llm.prompts().is_empty());
}

#[tokio::test]
async fn test_login_form_answers_scraped_question() {
    let app = create_test_app(ScriptedLlm::texts(&[" 1969\n"]), InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"extract": {"question": "Rok lądowania na Księżycu?"}}
        })))
        .mount(&app.remote)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("answer=1969"))
        .respond_with(ResponseTemplate::new(200).set_body_string("welcome"))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/1").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(app.llm.prompts()[0].contains("Rok lądowania na Księżycu?"));
    assert_eq!(app.llm.models(), vec![Some("gpt-4-turbo".to_string())]);
}

#[tokio::test]
async fn test_conversation_answers_verification_question() {
    let app = create_test_app(ScriptedLlm::texts(&["Kraków"]), InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/verify"))
        .and(body_json(json!({"text": "READY", "msgID": "0"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"msgID": 123, "text": "What is the capital of Poland?"})),
        )
        .mount(&app.remote)
        .await;
    Mock::given(method("POST"))
        .and(path("/verify"))
        .and(body_json(json!({"msgID": 123, "text": "Kraków"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msgID": 123, "text": "OK"})))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/2").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"data": "OK"}));
    assert!(app.llm.prompts()[0].contains("What is the capital of Poland?"));
    assert_eq!(app.llm.models(), vec![Some("gpt-4-turbo".to_string())]);
}

#[tokio::test]
async fn test_censorship_reports_model_output() {
    let app = create_test_app(
        ScriptedLlm::texts(&["Osoba podejrzana to CENZURA."]),
        InMemoryStorage::new(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path(format!("/data/{}/cenzura.txt", API_KEY)))
        .respond_with(ResponseTemplate::new(200).set_body_string("Osoba podejrzana to Jan Nowak."))
        .mount(&app.remote)
        .await;
    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_partial_json(json!({
            "task": "CENZURA",
            "answer": "Osoba podejrzana to CENZURA."
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "{FLG:CENZ}"})),
        )
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/5").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"]["message"], "{FLG:CENZ}");
}

#[tokio::test]
async fn test_robot_image_reports_generated_url() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    Mock::given(method("GET"))
        .and(path(format!("/data/{}/robotid.json", API_KEY)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"description": "a spider-like robot"})),
        )
        .mount(&app.remote)
        .await;
    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_json(json!({
            "task": "robotid",
            "apikey": API_KEY,
            "answer": "https://images.test/robot.png"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "{FLG:ROBOT}"})),
        )
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/7").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"data": "{FLG:ROBOT}"}));
}

#[tokio::test]
async fn test_robot_image_rejects_unexpected_reply() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    Mock::given(method("GET"))
        .and(path(format!("/data/{}/robotid.json", API_KEY)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"description": "a spider-like robot"})),
        )
        .mount(&app.remote)
        .await;
    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_partial_json(json!({
            "task": "robotid",
            "answer": "https://images.test/robot.png"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "weird"})))
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/7").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("unexpected report reply"));
}

#[tokio::test]
async fn test_research_reports_fixed_answer() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_json(json!({
            "task": "research",
            "apikey": API_KEY,
            "answer": ["01", "02", "10"]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "{FLG:RES}"})),
        )
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/402").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"]["code"], 0);
}

#[tokio::test]
async fn test_drone_webhook_registration_uses_public_url() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/report"))
        .and(body_partial_json(json!({
            "task": "webhook",
            "answer": "https://solver.test/api/403"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "{FLG:DRONE}"})),
        )
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/403").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"]["message"], "{FLG:DRONE}");
}

#[tokio::test]
async fn test_drone_position_is_described() {
    let app = create_test_app(ScriptedLlm::texts(&["skały"]), InMemoryStorage::new()).await;

    let response = app
        .server
        .post("/api/403")
        .json(&json!({"instruction": "poleciałem jedno pole w prawo, a później na sam dół"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({"description": "skały"}));
    assert_eq!(
        app.llm.prompts(),
        vec!["poleciałem jedno pole w prawo, a później na sam dół".to_string()]
    );
}

#[tokio::test]
async fn test_empty_drone_instruction_is_rejected() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app
        .server
        .post("/api/403")
        .json(&json!({"instruction": ""}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(app.llm.prompts().is_empty());
}

#[tokio::test]
async fn test_drone_body_without_instruction_is_bad_request() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app.server.post("/api/403").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("instruction"));
    assert!(app.llm.prompts().is_empty());
}

#[tokio::test]
async fn test_drone_plain_text_body_is_bad_request() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app.server.post("/api/403").text("instruction=prawo").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_phone_conversations_are_passed_through() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;
    let conversations = json!({
        "rozmowa1": ["Hej, jak się masz?", "Dobrze, dziękuję."],
        "rozmowa2": ["Kto mówi?"]
    });

    Mock::given(method("GET"))
        .and(path(format!("/data/{}/phone_sorted.json", API_KEY)))
        .respond_with(ResponseTemplate::new(200).set_body_json(conversations.clone()))
        .expect(1)
        .mount(&app.remote)
        .await;

    let response = app.server.get("/api/503").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "data": conversations }));
    assert!(app.llm.prompts().is_empty());
}

#[tokio::test]
async fn test_vector_search_requires_database() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app.server.get("/api/302").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("database.url"));
}
