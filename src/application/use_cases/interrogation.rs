// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::future::try_join_all;
use serde_json::{json, Value};
use tracing::info;

use crate::application::context::SolverContext;
use crate::utils::errors::SolverResult;

pub const TASK: &str = "mp3";
pub const AUDIO_DIR: &str = "6/audio";
pub const TRANSCRIPTS_DIR: &str = "6/transcripts";

const PROMPT_HEAD: &str = r#"
<prompt_objective>
The purpose of this prompt is to deduce and return the specific street name where Andrzej Maj teaches, based on careful analysis of transcripts and internal knowledge. </prompt_objective>

<prompt_rules>

READ and EXTRACT information from the provided transcripts, identifying any patterns or repeated mentions of locations.
PRIORITIZE any educational institutions or well-known academic streets, especially in Kraków, where details imply a location tied to Andrzej Maj's professional role.
USE internal knowledge to confirm or override inconsistent testimonies, especially in cases of ambiguity, but do not assume unless there is reasonable certainty from provided context clues.
FOCUS on identifying the correct educational location rather than unrelated or contradictory street names.
LIMIT output strictly to the identified street name, with no additional commentary or data. </prompt_rules>
<prompt_output>

Output should be a single street name in concise format. </prompt_output>
<prompt_examples>

Scenario 1: If testimonies mention other streets that seem unconnected to academia or teaching, the AI disregards these and uses internal knowledge for educational locations relevant to Andrzej Maj.
Scenario 2: If transcripts ambiguously reference streets, the AI uses hints around academic affiliation, especially those associated with mathematics or computer science, to focus on known academic locations. </prompt_examples>
"#;

/// 把所有证词放进推理提示词
pub fn build_prompt(transcripts: &[String]) -> String {
    let body: String = transcripts
        .iter()
        .map(|t| format!("  <transcript>\n{}\n  </transcript>\n", t.trim()))
        .collect();
    format!(
        "{} <transcript_contents>\n{}  </transcript_contents>\n",
        PROMPT_HEAD, body
    )
}

async fn transcribe(ctx: &SolverContext, name: String) -> SolverResult<String> {
    let audio = ctx.read_bytes(&format!("{}/{}", AUDIO_DIR, name)).await?;
    ctx.llm.transcribe(&name, audio).await
}

async fn gather_transcripts(ctx: &SolverContext) -> SolverResult<Vec<String>> {
    let audio = ctx.storage.list(AUDIO_DIR).await?;
    let mut transcripts = try_join_all(audio.into_iter().map(|name| transcribe(ctx, name))).await?;

    for name in ctx.storage.list(TRANSCRIPTS_DIR).await? {
        if name.ends_with(".txt") {
            transcripts.push(ctx.read_text(&format!("{}/{}", TRANSCRIPTS_DIR, name)).await?);
        }
    }
    Ok(transcripts)
}

/// 汇总审讯录音，推断 Andrzej Maj 任教的街道并提交
pub async fn execute(ctx: &SolverContext) -> SolverResult<Value> {
    let transcripts = gather_transcripts(ctx).await?;
    info!(count = transcripts.len(), "transcripts collected");

    let street = ctx.llm.complete(&build_prompt(&transcripts)).await?;
    info!(street = %street.trim(), "street deduced");

    ctx.headquarters.report(TASK, json!(street.trim())).await
}
