// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{json, Value};
use tracing::info;

use crate::application::context::SolverContext;
use crate::domain::models::report::{ReportReply, ReportRequest};
use crate::utils::errors::{SolverError, SolverResult};

pub const TASK: &str = "POLIGON";

/// 非空行
pub fn non_empty_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// 下载 `dane.txt`，逐行提交给 poligon 的 `/verify`
pub async fn execute(ctx: &SolverContext) -> SolverResult<String> {
    let base = ctx.settings.poligon.base_url.trim_end_matches('/');

    let raw = ctx
        .http
        .get(format!("{}/dane.txt", base))
        .header("Cache-Control", "no-store, max-age=0")
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let lines = non_empty_lines(&raw);
    info!(count = lines.len(), "poligon data fetched");

    let request = ReportRequest {
        task: TASK,
        apikey: &ctx.settings.centrala.api_key,
        answer: json!(lines),
    };
    let reply: Value = ctx
        .http
        .post(format!("{}/verify", base))
        .json(&request)
        .send()
        .await?
        .json()
        .await?;

    ReportReply::decode(&reply)
        .map(|decoded| decoded.message)
        .ok_or_else(|| SolverError::validation(format!("unexpected verify reply: {}", reply)))
}
