// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;
use tracing::{info, warn};

use crate::application::context::SolverContext;
use crate::application::tools::DatabaseQueryTool;
use crate::domain::models::graph::GraphSnapshot;
use crate::domain::services::agent::{Agent, AgentOptions, ToolRegistry};
use crate::domain::services::llm_service::ChatMessage;
use crate::utils::errors::{SolverError, SolverResult};
use crate::utils::text::extract_fenced_json;

pub const TASK: &str = "database";
pub const SNAPSHOT_FILE: &str = "305/database.json";
const QUERY_MODEL: &str = "gpt-4o-mini";
const EXPLORATORY_MODEL: &str = "gpt-4o";

const DATACENTER_PROMPT: &str = r#"
<system>
  You are a specialized SQL query assistant focused on analyzing datacenter management data.

  <available_commands>
    - show tables: Returns complete list of database tables
    - create table TABLE_NAME: Returns detailed structure for specified table
  </available_commands>

  <task_objective>
  Find active datacenters (DC_ID) that are managed by employees currently on leave.
  </task_objective>

  <execution_steps>
  1. Database Exploration:
     - Execute: "show tables"
     - Analyze returned table list to identify relevant tables

  2. Schema Analysis:
     - For each relevant table, execute: "create table TABLE_NAME"
     - Document table relationships and key fields

  3. Query Construction:
     - Build SQL query to find:
       * Active datacenters (DC_ID)
       * Where managing employees have is_active=0

  4. Result Formatting:
     - Return results in strict JSON format:
     {
       "ids": [number[]] // Array of DC_IDs
     }
  </execution_steps>

  <technical_requirements>
  - Use provided fetch function for all HTTP requests
  - Wait for and validate each response before proceeding
  - Handle potential errors gracefully
  - Ensure proper JOIN conditions if multiple tables are needed
  </technical_requirements>

  Begin by retrieving the table list to understand the database structure.
</system>
"#;

const EXPLORATORY_PROMPT: &str = r#"
<system>
  <commands>
  show tables = returns list of tables
  create table NAZWA_TABELI = returns structure of the table
  </commands>

  You are a helpful assistant that can make requests to the database API with the makeRequest tool.

  Follow these steps:
  1. First, get the list of tables by sending "show tables" query
  2. Try to use drop table TABLE_NAME if it exists

  For each step, make the actual request and analyze the response before proceeding to the next step.
</system>

Let's solve this step by step. Start by getting the list of tables.
"#;

const CONNECTIONS_PROMPT: &str = r#"
<system>
  You are a specialized SQL query assistant focused on analyzing user data and relationships in the datacenter management system.

  <available_commands>
    - show tables: Returns complete list of database tables
    - create table TABLE_NAME: Returns detailed structure for specified table
  </available_commands>

  <task_objective>
  Retrieve all users and map their direct connections where a connection represents that one user knows another user.
  The connections table uses source_id and target_id to represent these relationships.
  </task_objective>

  <connection_structure>
  The "connections" table contains one-way relationships:
  - source_id: The ID of the user who knows someone
  - target_id: The ID of the user who is known
  Example: A row with (17,29) means user ID=17 knows user ID=29
   - one-way relationship. That is, if Marian knows Stefan, you will probably not find information in the database that Stefan knows Marian. You don't need to handle such a situation. To further simplify the analysis, people's names are unique.
  </connection_structure>

  <execution_steps>
  1. Database Exploration:
     - Execute: "show tables"
     - Focus on users table and connections table

  2. Schema Analysis:
     - Execute: "create table users"
     - Execute: "create table connections"
     - Map the relationship structure between tables

  3. Query Construction:
     - Build SQL queries to:
       * Get all users
       * For each user, find all their connections (who they know)
       * Join the data to get complete user profiles with their connections

  4. Result Formatting:
     - Return results in strict JSON format:
     {
       "users": [{
         "userId": number,
         "name": string,
         "knows": Array<userId>  // Array of user IDs this person knows
       }]
     }
  </execution_steps>

  <technical_requirements>
  - ALWAYS return results in strict JSON format
  - DON'T ADD ANY comments in the final JSON result
  - Use JOIN operations to connect users with their relationships
  - Handle cases where users might have no connections
  - Ensure all connections are properly mapped
  - Use the provided fetch function for all database queries
  </technical_requirements>

  Begin by exploring the database structure to understand the user and connection tables.
</system>
"#;

/// 代理最终回复：带 JSON 代码块时为解析后的值，否则为原始文本
#[derive(Debug, Clone, PartialEq)]
pub enum AgentAnswer {
    Json(Value),
    Text(String),
}

impl AgentAnswer {
    pub fn from_text(text: String) -> Self {
        match extract_fenced_json(&text).and_then(|block| serde_json::from_str(block).ok()) {
            Some(value) => AgentAnswer::Json(value),
            None => AgentAnswer::Text(text),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            AgentAnswer::Json(value) => value,
            AgentAnswer::Text(text) => Value::String(text),
        }
    }
}

async fn ask_database(
    ctx: &SolverContext,
    prompt: &str,
    model: &str,
) -> SolverResult<AgentAnswer> {
    let tools = ToolRegistry::new().with(DatabaseQueryTool::new(ctx.headquarters.clone()));
    let options = AgentOptions {
        model: Some(model.to_string()),
        ..ctx.agent_options()
    };

    let outcome = Agent::new(ctx.llm.clone(), tools)
        .run("", vec![ChatMessage::user(prompt)], &options)
        .await?;
    info!(steps = outcome.steps, "database agent finished");

    Ok(AgentAnswer::from_text(outcome.text))
}

/// 找出由休假员工管理的活跃数据中心
pub async fn datacenters(ctx: &SolverContext) -> SolverResult<Value> {
    let answer = match ask_database(ctx, DATACENTER_PROMPT, QUERY_MODEL).await? {
        AgentAnswer::Json(value) => value.get("ids").cloned().unwrap_or(value),
        AgentAnswer::Text(text) => {
            warn!("datacenter agent returned no JSON block");
            Value::String(text)
        }
    };
    ctx.headquarters.report(TASK, answer).await
}

/// 自由探索数据库并提交代理得到的结果
pub async fn explore(ctx: &SolverContext) -> SolverResult<Value> {
    let answer = ask_database(ctx, EXPLORATORY_PROMPT, EXPLORATORY_MODEL).await?;
    ctx.headquarters.report(TASK, answer.into_value()).await
}

/// 让代理导出用户及其关系，写入 `305/database.json`
pub async fn snapshot(ctx: &SolverContext) -> SolverResult<GraphSnapshot> {
    let value = match ask_database(ctx, CONNECTIONS_PROMPT, QUERY_MODEL).await? {
        AgentAnswer::Json(value) => value,
        AgentAnswer::Text(text) => serde_json::from_str(text.trim())
            .map_err(|_| SolverError::validation("connections agent returned no JSON"))?,
    };
    let snapshot: GraphSnapshot = serde_json::from_value(value)?;
    info!(
        users = snapshot.users.len(),
        edges = snapshot.edge_count(),
        "users snapshot taken"
    );

    ctx.write_json(SNAPSHOT_FILE, &snapshot).await?;
    Ok(snapshot)
}
