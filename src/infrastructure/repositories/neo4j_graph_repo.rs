// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::config::settings::GraphSettings;
use crate::domain::models::graph::GraphSnapshot;
use crate::domain::repositories::graph_repository::GraphRepository;
use crate::utils::errors::{SolverError, SolverResult};

const MERGE_PEOPLE: &str = "UNWIND $users AS user \
    MERGE (u:Person {userId: user.userId}) \
    ON CREATE SET u.name = user.name";

const MERGE_KNOWS: &str = "UNWIND $edges AS edge \
    MATCH (u:Person {userId: edge.from}), (k:Person {userId: edge.to}) \
    MERGE (u)-[:KNOWS]->(k)";

const SHORTEST_PATH: &str = "MATCH p = shortestPath((from:Person {name: $from})-[*]-(to:Person {name: $to})) \
    RETURN [n IN nodes(p) | n.name] AS names";

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

/// 通过 Neo4j HTTP 事务端点访问人物关系图
pub struct Neo4jGraphRepository {
    client: reqwest::Client,
    commit_url: String,
    username: String,
    password: String,
}

impl Neo4jGraphRepository {
    pub fn new(client: reqwest::Client, settings: &GraphSettings) -> Self {
        Self {
            client,
            commit_url: format!(
                "{}/db/{}/tx/commit",
                settings.url.trim_end_matches('/'),
                settings.database
            ),
            username: settings.username.clone(),
            password: settings.password.clone(),
        }
    }

    /// 在单个事务中提交若干语句
    async fn commit(&self, statements: Vec<Value>) -> SolverResult<Vec<TxResult>> {
        let response = self
            .client
            .post(&self.commit_url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&json!({ "statements": statements }))
            .send()
            .await?
            .error_for_status()?;

        let payload: TxResponse = response.json().await?;
        if let Some(err) = payload.errors.first() {
            error!(code = %err.code, "graph transaction failed");
            return Err(SolverError::Database(format!("{}: {}", err.code, err.message)));
        }
        Ok(payload.results)
    }
}

#[async_trait]
impl GraphRepository for Neo4jGraphRepository {
    async fn import(&self, snapshot: &GraphSnapshot) -> SolverResult<usize> {
        let users: Vec<Value> = snapshot
            .users
            .iter()
            .map(|u| json!({ "userId": u.user_id, "name": u.name }))
            .collect();
        let edges: Vec<Value> = snapshot
            .users
            .iter()
            .flat_map(|u| u.knows.iter().map(move |k| json!({ "from": u.user_id, "to": k })))
            .collect();

        self.commit(vec![
            json!({ "statement": MERGE_PEOPLE, "parameters": { "users": users } }),
            json!({ "statement": MERGE_KNOWS, "parameters": { "edges": edges } }),
        ])
        .await?;

        debug!(people = users.len(), edges = edges.len(), "graph import committed");
        Ok(edges.len())
    }

    async fn shortest_path(&self, from: &str, to: &str) -> SolverResult<Vec<String>> {
        let results = self
            .commit(vec![json!({
                "statement": SHORTEST_PATH,
                "parameters": { "from": from, "to": to },
            })])
            .await?;

        let names = results
            .into_iter()
            .next()
            .and_then(|result| result.data.into_iter().next())
            .and_then(|row| row.row.into_iter().next())
            .ok_or_else(|| {
                SolverError::validation(format!("no path between {} and {}", from, to))
            })?;

        Ok(serde_json::from_value(names)?)
    }
}
