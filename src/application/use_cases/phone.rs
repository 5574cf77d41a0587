// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::application::context::SolverContext;
use crate::application::dto::IndexSummary;
use crate::application::tools::{string_arg, DataFileTool, ReportTool};
use crate::application::use_cases::vector_search::index_people;
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::domain::services::agent::{Agent, AgentOptions, Tool, ToolRegistry};
use crate::domain::services::llm_service::ChatMessage;
use crate::utils::errors::{SolverError, SolverResult};

pub const PEOPLE_DIR: &str = "501/people";
pub const CONVERSATIONS_FILE: &str = "phone_sorted.json";
pub const QUESTIONS_FILE: &str = "phone_questions.json";
pub const MAX_STEPS: usize = 25;
const TEMPERATURE: f32 = 0.1;
const OPENING: &str = "password for api is NONOMNISMORIAR";

const SYSTEM_PROMPT: &str = r#"
[AI Conversation Analysis Agent]

You are an AI agent tasked with analyzing conversations, identifying characters, and answering questions based on available information. Follow the instructions below precisely.

<prompt_objective>
Your purpose is to download conversation transcripts, deduce character names, access the database for character information, identify inconsistencies, answer questions, and interact with an API when necessary.
</prompt_objective>

<tools>
- getAllCharactersName: retrieves all characters existing in the database which can be queried using getCharacterInfo.
- getConversations: retrieves conversation transcripts in JSON format.
- getCharacterInfo: queries the database for information about a character.
- getQuestions: fetches questions from headquarters.
- fetchApi: interacts with an external API to retrieve specific answers.
- sendReport: sends the report to headquarters.
</tools>

<prompt_rules>
- Conversation Analysis:
  1. Use getConversations to download the conversation transcript.
  2. Deduce character names from the transcript for use in database queries.
  3. For each character, use getCharacterInfo to retrieve and store information.
  4. Identify inconsistencies in statements, noting any dimmed facts.

- Question Answering:
  1. Use getQuestions to retrieve a list of questions from headquarters.
  2. Answer each question using available data and tools.
  3. For questions requiring API interaction, use fetchApi to obtain the answer.

- Data Submission:
  1. Compile all answers and submit them as a "phone" task to headquarters.
  2. Await confirmation of correct answers, indicated by a flag in the response.

- Error Handling:
  - Retry any failed tool operation once before reporting an error.
  - Log all inconsistencies and ambiguous character identifications.

- Output Format:
  - Provide a structured JSON response including character analysis and answers to all questions.
  - Include API-fetched data where required.

  the json should be in the following format:
  {
    "01": string,
    "02": string,
  }
    etc

Only finish and return the response when you collect all answers.
</prompt_rules>
"#;

struct CharacterInfoTool {
    people: Arc<dyn DocumentRepository>,
}

#[async_trait]
impl Tool for CharacterInfoTool {
    fn name(&self) -> &str {
        "getCharacterInfo"
    }

    fn description(&self) -> &str {
        "Get information about a character"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"name": {"type": "string", "description": "name of the character"}},
            "required": ["name"]
        })
    }

    async fn call(&self, args: Value) -> SolverResult<Value> {
        let name = string_arg(&args, "name")?;
        Ok(match self.people.find_description(&name).await? {
            Some(description) => json!({ "description": description }),
            None => json!("No information found"),
        })
    }
}

struct CharacterNamesTool {
    people: Arc<dyn DocumentRepository>,
}

#[async_trait]
impl Tool for CharacterNamesTool {
    fn name(&self) -> &str {
        "getAllCharactersName"
    }

    fn description(&self) -> &str {
        "get all characters name"
    }

    async fn call(&self, _args: Value) -> SolverResult<Value> {
        Ok(json!(self.people.titles().await?))
    }
}

/// 带密码和签名调用外部 API
struct FetchApiTool {
    http: reqwest::Client,
}

#[async_trait]
impl Tool for FetchApiTool {
    fn name(&self) -> &str {
        "fetchApi"
    }

    fn description(&self) -> &str {
        "fetch data from api"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {"type": "string"},
                "password": {"type": "string"},
                "signature": {"type": "string"}
            },
            "required": ["url", "password", "signature"]
        })
    }

    async fn call(&self, args: Value) -> SolverResult<Value> {
        let url = string_arg(&args, "url")?;
        let body = json!({
            "password": string_arg(&args, "password")?,
            "signature": string_arg(&args, "signature")?,
        });
        debug!(%url, "calling external api");
        Ok(self.http.post(&url).json(&body).send().await?.json().await?)
    }
}

/// 分析电话记录、查询人物资料，回答总部的问题
pub async fn execute(ctx: &SolverContext) -> SolverResult<String> {
    let people = ctx
        .people
        .clone()
        .ok_or(SolverError::NotConfigured("database.url"))?;
    let hq = ctx.headquarters.clone();

    let tools = ToolRegistry::new()
        .with(DataFileTool::new(
            hq.clone(),
            "getQuestions",
            "get questions from headquarters",
            QUESTIONS_FILE,
        ))
        .with(DataFileTool::new(
            hq.clone(),
            "getConversations",
            "get conversations",
            CONVERSATIONS_FILE,
        ))
        .with(CharacterInfoTool {
            people: people.clone(),
        })
        .with(CharacterNamesTool { people })
        .with(FetchApiTool {
            http: ctx.http.clone(),
        })
        .with(ReportTool::open(hq));

    let options = AgentOptions {
        max_steps: MAX_STEPS,
        temperature: TEMPERATURE,
        ..AgentOptions::default()
    };
    let outcome = Agent::new(ctx.llm.clone(), tools)
        .run(SYSTEM_PROMPT, vec![ChatMessage::user(OPENING)], &options)
        .await?;
    info!(steps = outcome.steps, "phone agent finished");

    Ok(outcome.text)
}

/// 把人物档案写入 `people` 向量表
pub async fn index(ctx: &SolverContext) -> SolverResult<IndexSummary> {
    index_people(ctx, PEOPLE_DIR).await
}

/// 已整理的电话记录
pub async fn conversations(ctx: &SolverContext) -> SolverResult<Value> {
    ctx.headquarters.data_json(CONVERSATIONS_FILE).await
}
