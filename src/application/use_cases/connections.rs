// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{json, Value};
use tracing::info;

use crate::application::context::SolverContext;
use crate::application::use_cases::database_agent::SNAPSHOT_FILE;
use crate::domain::models::graph::GraphSnapshot;
use crate::utils::errors::{SolverError, SolverResult};

pub const TASK: &str = "connections";
pub const FROM: &str = "Rafał";
pub const TO: &str = "Barbara";

/// 把 `305/database.json` 导入图数据库，返回写入的关系数
pub async fn import(ctx: &SolverContext) -> SolverResult<usize> {
    let snapshot: GraphSnapshot = ctx.read_json(SNAPSHOT_FILE).await?;
    let imported = ctx.graph.import(&snapshot).await?;
    info!(users = snapshot.users.len(), edges = imported, "graph imported");
    Ok(imported)
}

/// 查询两人之间的最短路径并提交
pub async fn execute(ctx: &SolverContext) -> SolverResult<Value> {
    let path = ctx.graph.shortest_path(FROM, TO).await?;
    if path.is_empty() {
        return Err(SolverError::validation(format!("no path from {} to {}", FROM, TO)));
    }

    let joined = path.join(",");
    info!(path = %joined, "shortest path found");
    ctx.headquarters.report(TASK, json!(joined)).await
}
