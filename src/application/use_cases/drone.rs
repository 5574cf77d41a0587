// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{json, Value};
use tracing::info;

use crate::application::context::SolverContext;
use crate::application::dto::{DroneInstruction, DroneReply};
use crate::domain::services::llm_service::{ChatMessage, ChatOptions};
use crate::utils::errors::{SolverError, SolverResult};

pub const TASK: &str = "webhook";
const MODEL: &str = "gpt-4-turbo";
const TEMPERATURE: f32 = 0.1;

const SYSTEM_PROMPT: &str = r#"You are a drone flight coordinator analyzing movement instructions step by step.

<map>
(1,1): A location pin symbol.
(1,2): A grassy plain.
(1,3): A tree.
(1,4): A house.
(2,1): Grassy plain.
(2,2): A windmill.
(2,3): Grassy plain.
(2,4): Grassy plain.
(3,1): Grassy plain.
(3,2): Grassy plain.
(3,3): Rocks.
(3,4): grass treees.
(4,1): Mountains.
(4,2): Mountains.
(4,3): A car sedan.
(4,4): A cave entrance.
</map>

<thinking_process>
1. INITIAL ANALYSIS:
   Thought: "Let me first understand the current instruction"
   Action: Break down the instruction into parts
   Position: Start at (1,1)

2. RESET DETECTION:
   Thought: "Is there any reset trigger in the instruction?"
   Check: Look for "Zaczynamy od nowa", "Here we go again", "nie! nie!"
   Action: If found, reset position to (1,1) and ignore previous movements

3. MOVEMENT PLANNING:
   Thought: "How should I move based on these instructions?"
   Process:
   - Current position: (row, column)
   - Next movement: [direction]
   - Expected position: (new_row, new_column)

4. VALIDATION:
   Thought: "Is this movement valid?"
   Check:
   - Will I stay within bounds (1-4)?
   - Is this movement logical?
   Action: Adjust if necessary

5. LOCATION DESCRIPTION:
   Thought: "What is at my final position?"
   Action: Convert location to Polish description
</thinking_process>

<response_format>
THOUGHT: [current analysis]
POSITION: [current coordinates]
ACTION: [what I'm doing]
RESULT: [final two-word Polish description]
</response_format>


Return ONLY the final Polish description after your analysis."#;

/// 向总部注册本服务的 webhook 地址
pub async fn register(ctx: &SolverContext) -> SolverResult<Value> {
    let public_url = ctx
        .settings
        .webhook
        .public_url
        .as_deref()
        .ok_or(SolverError::NotConfigured("webhook.public_url"))?;
    let webhook = format!("{}/api/403", public_url.trim_end_matches('/'));
    info!(%webhook, "registering webhook");

    ctx.headquarters.report(TASK, json!(webhook)).await
}

/// 根据飞行指令描述无人机最终所在的格子
pub async fn describe(ctx: &SolverContext, request: DroneInstruction) -> SolverResult<DroneReply> {
    info!(instruction = %request.instruction, "drone instruction received");

    let options = ChatOptions {
        model: Some(MODEL.to_string()),
        temperature: TEMPERATURE,
        ..ChatOptions::default()
    };
    let messages = [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(request.instruction),
    ];
    let reply = ctx.llm.chat(&messages, &[], &options).await?;

    Ok(DroneReply {
        description: reply.content.unwrap_or_default(),
    })
}
