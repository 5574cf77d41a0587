// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::future::try_join_all;
use serde_json::{Map, Value};
use tracing::info;

use crate::application::context::SolverContext;
use crate::utils::errors::SolverResult;

pub const TASK: &str = "dokumenty";
pub const FACTS_DIR: &str = "301/facts";
pub const REPORTS_DIR: &str = "301/reports";
pub const METADATA_FILE: &str = "301/facts/metadata.json";

fn prompt(database: &str) -> String {
    format!(
        r#"Extract and prioritize keywords from a provided JSON input of reports and a facts database. The process must prioritize extracting person-related keywords from the database if a match can be found, using contextual clues such as filenames or report content. If no match is found in the database, or if the report is not about persons, create relevant keywords directly from the report text.

Objective:
1. Extract up to 10 keywords from each report. If the report is about persons and a match exists in the database, prioritize extracting keywords from the database.
2. If the report is not about persons, generate relevant keywords from the report text.
3. Always include the sector identifier (e.g., "D3") as the first keyword in the output.

Facts Database:
{}


<Rules>
ALL keywords must be in lowercase.
MOST IMPORTANT If a match is found in the database, extract the following if applicable:
- Profession
- Name
- Affiliations
- Skills
If person is captured add "captured" to keywords.
ALWAYS return one word as a keyword.
YOU CAN divide phrase to keywords if it is necessary.
 If no match is found in the database or if the report is not about persons:
   - Extract up to 10 keywords from the report text.
   - Focus on nouns or noun phrases related to the context (e.g., professions, events, topics).
 Limit the output to between 8 and 10 keywords.
 Output should always be in JSON format, with the structure:
   - {{ "file-name-01-sektor_D3.txt": "D3, keyword1, keyword2, ..." }}
 Handle each report independently and ensure consistent output for all inputs.

Examples:

Input:
{{
  "file-name-01-sektor_D3.txt": "we found a person near the university.",
  "file-name-02-sektor_F7.txt": "She is a programmer who teaches others.",
  "file-name-03-sektor_C5.txt": "Automated factories are becoming a cornerstone of industry.",
  "file-name-04-sektor_A1.txt": "The lab assistant is working on memory modification technologies.",
  "file-name-05-sektor_X1.txt": "Advancements in AI are shaping the future of technology."
}}

Facts Database:
[
  {{
    "fileName": "f04.txt",
    "character": {{
      "name": "Tomasz Zimowski",
      "profession": "English teacher",
      "affiliations": ["School No. 9 in Grudziądz", "Resistance Movement"],
      "skills": ["Creative teaching", "Community involvement", "Programming (Java)"],
      "notable_actions": ["Criticized the robot regime", "Organized secret meetings against AI control"]
    }}
  }},
  {{
    "fileName": "f08.txt",
    "character": {{
      "name": "Grzegorz Gospodarczyk",
      "profession": "Programmer, recruiter",
      "affiliations": ["Resistance Movement"],
      "skills": ["Advanced programming", "AI system bypass techniques", "Recruitment and training"],
      "notable_actions": ["Trained resistance agents", "Maintained covert operations"]
    }}
  }},
  {{
    "fileName": "f06.txt",
    "character": {{
      "name": "Azazel",
      "profession": "Unknown",
      "affiliations": ["Resistance Movement"],
      "skills": ["Teleportation", "Knowledge of future technologies", "Industrial automation expertise"],
      "notable_actions": ["Presence in strategic automated factories"]
    }}
  }}
]

Expected Output:
{{
  "file-name-01-sektor_D3.txt": "D3, Tomasz, Zimowski, teacher, community, involvement, programming, java",
  "file-name-02-sektor_F7.txt": "F7, Grzegorz, Gospodarczyk, programmer, recruiter, programming, Resistance, Movement, training",
  "file-name-03-sektor_C5.txt": "C5, factories, automation, industry, cornerstone, strategic",
  "file-name-04-sektor_A1.txt": "A1, lab assistant, memory modification, nanotechnology, research",
  "file-name-05-sektor_X1.txt": "X1, AI, advancements, technology, future, innovation"
}} "#,
        database
    )
}

async fn read_entry(
    ctx: &SolverContext,
    dir: &str,
    name: String,
) -> SolverResult<(String, String)> {
    let text = ctx.read_text(&format!("{}/{}", dir, name)).await?;
    Ok((name, text))
}

async fn read_dir(
    ctx: &SolverContext,
    dir: &str,
    skip: &str,
) -> SolverResult<Vec<(String, String)>> {
    let names = ctx.storage.list(dir).await?;
    try_join_all(
        names
            .into_iter()
            .filter(|name| name != skip)
            .map(|name| read_entry(ctx, dir, name)),
    )
    .await
}

/// 读取事实元数据；缺失时由其余事实文件生成并写回
pub async fn load_facts_metadata(ctx: &SolverContext) -> SolverResult<String> {
    if ctx.storage.exists(METADATA_FILE).await? {
        return ctx.read_text(METADATA_FILE).await;
    }

    let facts: Vec<String> = read_dir(ctx, FACTS_DIR, "metadata.json")
        .await?
        .into_iter()
        .map(|(_, text)| text)
        .collect();
    info!(facts = facts.len(), "building facts metadata");

    let metadata = serde_json::to_string(&facts)?;
    ctx.storage.save(METADATA_FILE, metadata.as_bytes()).await?;
    Ok(metadata)
}

/// 为每份报告生成关键词并提交
pub async fn execute(ctx: &SolverContext) -> SolverResult<Value> {
    let metadata = load_facts_metadata(ctx).await?;

    let reports: Map<String, Value> = read_dir(ctx, REPORTS_DIR, "")
        .await?
        .into_iter()
        .map(|(name, text)| (name, Value::String(text)))
        .collect();
    info!(reports = reports.len(), "extracting report keywords");

    let record = serde_json::to_string(&reports)?;
    let keywords = ctx.llm.complete_json(&prompt(&metadata), &record).await?;

    ctx.headquarters.report(TASK, keywords).await
}
