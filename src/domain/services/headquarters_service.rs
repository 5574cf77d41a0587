// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::config::settings::CentralaSettings;
use crate::domain::models::report::{normalize_answer, ReportReply, ReportRequest};
use crate::utils::errors::{SolverError, SolverResult};

/// 总部服务：报告端点、数据文件与辅助查询 API
#[async_trait]
pub trait Headquarters: Send + Sync {
    /// 提交答案，返回端点的原始 JSON 回复
    async fn report(&self, task: &str, answer: Value) -> SolverResult<Value>;

    /// `GET /data/<apikey>/<file>` 的文本内容
    async fn data_text(&self, file: &str) -> SolverResult<String>;

    /// `GET /data/<apikey>/<file>` 的 JSON 内容
    async fn data_json(&self, file: &str) -> SolverResult<Value>;

    /// 在 `apidb` 上执行查询
    async fn query_database(&self, query: &str) -> SolverResult<Value>;

    /// 按城市或人名查询 `places`
    async fn places(&self, query: &str) -> SolverResult<Value>;

    /// 查询用户坐标
    async fn gps(&self, user_id: i64) -> SolverResult<Value>;

    /// 提交答案并要求回复为 `{code, message}`
    async fn report_checked(&self, task: &str, answer: Value) -> SolverResult<ReportReply> {
        let reply = self.report(task, answer).await?;
        ReportReply::decode(&reply).ok_or_else(|| {
            SolverError::validation(format!("unexpected report reply: {}", reply))
        })
    }
}

/// 基于 HTTP 的总部客户端
pub struct CentralaClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CentralaClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_settings(client: reqwest::Client, settings: &CentralaSettings) -> Self {
        Self::new(client, &settings.base_url, &settings.api_key)
    }

    fn data_url(&self, file: &str) -> String {
        format!("{}/data/{}/{}", self.base_url, self.api_key, file)
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> SolverResult<Value> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        Ok(response.json().await?)
    }

    async fn get_data(&self, file: &str) -> SolverResult<reqwest::Response> {
        let response = self
            .client
            .get(self.data_url(file))
            .header("Cache-Control", "no-cache")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SolverError::http(format!(
                "data file {} returned {}",
                file,
                response.status()
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl Headquarters for CentralaClient {
    async fn report(&self, task: &str, answer: Value) -> SolverResult<Value> {
        let request = ReportRequest {
            task,
            apikey: &self.api_key,
            answer: normalize_answer(answer),
        };

        let reply = match self.post_json("report", &request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(task, error = %e, "report failed");
                metrics::counter!(
                    "solvrs_reports_total",
                    "task" => task.to_string(),
                    "outcome" => "error"
                )
                .increment(1);
                return Err(e);
            }
        };

        let outcome = match ReportReply::decode(&reply) {
            Some(decoded) if decoded.has_flag() => "flag",
            Some(decoded) if decoded.code == 0 => "accepted",
            _ => "rejected",
        };
        metrics::counter!("solvrs_reports_total", "task" => task.to_string(), "outcome" => outcome)
            .increment(1);
        info!(task, outcome, %reply, "report sent");

        Ok(reply)
    }

    async fn data_text(&self, file: &str) -> SolverResult<String> {
        Ok(self.get_data(file).await?.text().await?)
    }

    async fn data_json(&self, file: &str) -> SolverResult<Value> {
        let text = self.data_text(file).await?;
        serde_json::from_str(&text)
            .map_err(|e| SolverError::validation(format!("{} is not JSON: {}", file, e)))
    }

    async fn query_database(&self, query: &str) -> SolverResult<Value> {
        let body = json!({
            "task": "database",
            "apikey": self.api_key,
            "query": query,
        });
        self.post_json("apidb", &body).await
    }

    async fn places(&self, query: &str) -> SolverResult<Value> {
        let body = json!({
            "query": query,
            "apikey": self.api_key,
        });
        self.post_json("places", &body).await
    }

    async fn gps(&self, user_id: i64) -> SolverResult<Value> {
        self.post_json("gps", &json!({ "userID": user_id })).await
    }
}
