// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, ScriptedLlm};
use axum::http::StatusCode;
use solvrs::infrastructure::storage::InMemoryStorage;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_version_matches_package() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app.server.get("/version").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app(ScriptedLlm::texts(&[]), InMemoryStorage::new()).await;

    let response = app.server.get("/api/404").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
