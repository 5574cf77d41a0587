// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::application::context::SolverContext;
use crate::application::tools::{string_arg, DataFileTool, ReportTool};
use crate::domain::services::agent::{Agent, AgentOptions, Tool, ToolRegistry};
use crate::domain::services::headquarters_service::Headquarters;
use crate::utils::errors::{SolverError, SolverResult};

pub const TASK: &str = "gps";
pub const MAX_STEPS: usize = 25;
const TEMPERATURE: f32 = 0.1;

const SYSTEM_PROMPT: &str = r#"
[AI Agent Analysis & GPS Tracking System]

You are an AI agent tasked with analyzing agent logs, tracking locations, and correlating user data. Follow these instructions precisely.

<prompt_objective>
Your purpose is to analyze malfunctioning agent logs, understand agent purposes, process location data, and correlate user information to answer headquarters' questions.
</prompt_objective>

<tools>
- getQuestions: fetches questions from headquarters
- getCharacterLocation: retrieves GPS coordinates
- getUserIdsByNames: retrieves user information including IDs by names
- sendReport: submits findings to headquarters
</tools>

<prompt_task>
1. Find out who was supposed to meet Rafał in Lubawa using getUsersByPlace tool. (query for Lubawa)
2. Retrieve users IDs for the people found in Lubawa, excluding Barbara. (tool getUserIdsByNames) passing the names found in step 1
3. Get GPS coordinates for the users who were supposed to meet Rafał in Lubawa (tool getCharacterLocation)
4. collect data and  format data to



{ answer: {
    "name": {
        "lat": 12.345,
        "lon": 65.431
    }
}

5  Report Submission using tool sendReport



Only return response when all data is collected and verified.
</prompt_task>
"#;

/// 按用户名查询用户的 SQL；没有名字时取前 100 个用户
pub fn users_query(names: &[String]) -> String {
    if names.is_empty() {
        return "select * from users limit 100".to_string();
    }
    let quoted: Vec<String> = names
        .iter()
        .map(|name| format!("'{}'", name.replace('\'', "''")))
        .collect();
    format!("select * from users where username in ({})", quoted.join(","))
}

struct UsersByPlaceTool {
    headquarters: Arc<dyn Headquarters>,
}

#[async_trait]
impl Tool for UsersByPlaceTool {
    fn name(&self) -> &str {
        "getUsersByPlace"
    }

    fn description(&self) -> &str {
        "get users by place"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"place": {"type": "string"}},
            "required": ["place"]
        })
    }

    async fn call(&self, args: Value) -> SolverResult<Value> {
        let place = string_arg(&args, "place")?;
        debug!(%place, "looking up place");
        self.headquarters.places(&place).await
    }
}

struct UserIdsTool {
    headquarters: Arc<dyn Headquarters>,
}

#[async_trait]
impl Tool for UserIdsTool {
    fn name(&self) -> &str {
        "getUserIdsByNames"
    }

    fn description(&self) -> &str {
        "Get information about users, optionally filtered by names"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "names": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "array of user names to filter by"
                }
            }
        })
    }

    async fn call(&self, args: Value) -> SolverResult<Value> {
        let names: Vec<String> = match args.get("names") {
            Some(names) => serde_json::from_value(names.clone())?,
            None => Vec::new(),
        };
        self.headquarters.query_database(&users_query(&names)).await
    }
}

struct CharacterLocationTool {
    headquarters: Arc<dyn Headquarters>,
}

#[async_trait]
impl Tool for CharacterLocationTool {
    fn name(&self) -> &str {
        "getCharacterLocation"
    }

    fn description(&self) -> &str {
        "get character location"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"userID": {"type": "number", "description": "user id"}},
            "required": ["userID"]
        })
    }

    async fn call(&self, args: Value) -> SolverResult<Value> {
        let user_id = match args.get("userID") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| SolverError::validation("missing numeric argument `userID`"))?;
        self.headquarters.gps(user_id).await
    }
}

/// 根据日志和地点数据找出目标人物坐标并提交
pub async fn execute(ctx: &SolverContext) -> SolverResult<String> {
    let hq = ctx.headquarters.clone();
    let tools = ToolRegistry::new()
        .with(UsersByPlaceTool {
            headquarters: hq.clone(),
        })
        .with(UserIdsTool {
            headquarters: hq.clone(),
        })
        .with(CharacterLocationTool {
            headquarters: hq.clone(),
        })
        .with(DataFileTool::new(
            hq.clone(),
            "readLogs",
            "read logs from the malfunctioning agent",
            "gps.txt",
        ))
        .with(DataFileTool::new(
            hq.clone(),
            "getQuestion",
            "get questions from headquarters",
            "gps_question.json",
        ))
        .with(ReportTool::for_task(
            hq,
            "sendReport",
            "send report to headquarters",
            TASK,
            "answer",
        ));

    let options = AgentOptions {
        max_steps: MAX_STEPS,
        temperature: TEMPERATURE,
        ..AgentOptions::default()
    };
    let outcome = Agent::new(ctx.llm.clone(), tools)
        .run(SYSTEM_PROMPT, Vec::new(), &options)
        .await?;
    info!(steps = outcome.steps, "gps agent finished");

    Ok(outcome.text)
}
