// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 多个代理共用的工具

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::services::agent::Tool;
use crate::domain::services::headquarters_service::Headquarters;
use crate::utils::errors::{SolverError, SolverResult};

pub fn string_arg(args: &Value, name: &str) -> SolverResult<String> {
    args.get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SolverError::validation(format!("missing string argument `{}`", name)))
}

/// 通过总部 `apidb` 执行 SQL
pub struct DatabaseQueryTool {
    headquarters: Arc<dyn Headquarters>,
}

impl DatabaseQueryTool {
    pub fn new(headquarters: Arc<dyn Headquarters>) -> Self {
        Self { headquarters }
    }
}

#[async_trait]
impl Tool for DatabaseQueryTool {
    fn name(&self) -> &str {
        "makeRequest"
    }

    fn description(&self) -> &str {
        "Make an HTTP POST request to the database API"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "The SQL query to execute"}
            },
            "required": ["query"]
        })
    }

    async fn call(&self, args: Value) -> SolverResult<Value> {
        let query = string_arg(&args, "query")?;
        debug!(%query, "database query");
        self.headquarters.query_database(&query).await
    }
}

/// 向报告端点提交答案
///
/// 固定任务名时从 `answer_arg` 参数取答案；否则由模型同时给出 `task` 和 `data`
pub struct ReportTool {
    headquarters: Arc<dyn Headquarters>,
    name: &'static str,
    description: &'static str,
    task: Option<&'static str>,
    answer_arg: &'static str,
}

impl ReportTool {
    /// 任务名固定的报告工具
    pub fn for_task(
        headquarters: Arc<dyn Headquarters>,
        name: &'static str,
        description: &'static str,
        task: &'static str,
        answer_arg: &'static str,
    ) -> Self {
        Self {
            headquarters,
            name,
            description,
            task: Some(task),
            answer_arg,
        }
    }

    /// `sendReport(task, data)`
    pub fn open(headquarters: Arc<dyn Headquarters>) -> Self {
        Self {
            headquarters,
            name: "sendReport",
            description: "send report to headquarters",
            task: None,
            answer_arg: "data",
        }
    }
}

#[async_trait]
impl Tool for ReportTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameters(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        if self.task.is_none() {
            properties.insert("task".to_string(), json!({"type": "string"}));
            required.push("task");
        }
        properties.insert(self.answer_arg.to_string(), json!({}));
        required.push(self.answer_arg);

        json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }

    async fn call(&self, args: Value) -> SolverResult<Value> {
        let task = match self.task {
            Some(task) => task.to_string(),
            None => string_arg(&args, "task")?,
        };
        let answer = args
            .get(self.answer_arg)
            .cloned()
            .ok_or_else(|| {
                SolverError::validation(format!("missing argument `{}`", self.answer_arg))
            })?;

        info!(%task, "agent submitting report");
        self.headquarters.report(&task, answer).await
    }
}

/// 读取总部数据文件，`.json` 文件按 JSON 返回，其余按文本返回
pub struct DataFileTool {
    headquarters: Arc<dyn Headquarters>,
    name: &'static str,
    description: &'static str,
    file: &'static str,
}

impl DataFileTool {
    pub fn new(
        headquarters: Arc<dyn Headquarters>,
        name: &'static str,
        description: &'static str,
        file: &'static str,
    ) -> Self {
        Self {
            headquarters,
            name,
            description,
            file,
        }
    }
}

#[async_trait]
impl Tool for DataFileTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    async fn call(&self, _args: Value) -> SolverResult<Value> {
        if self.file.ends_with(".json") {
            self.headquarters.data_json(self.file).await
        } else {
            self.headquarters.data_text(self.file).await.map(Value::String)
        }
    }
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
