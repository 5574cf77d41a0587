// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use url::Url;

use crate::application::context::SolverContext;
use crate::application::dto::NotesQuestions;
use crate::application::tools::string_arg;
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::domain::services::agent::{Agent, AgentOptions, Tool, ToolRegistry};
use crate::domain::services::crawl_service::{Crawler, ScrapeFormat};
use crate::domain::services::llm_service::ChatMessage;
use crate::utils::errors::{SolverError, SolverResult};
use crate::utils::text::parse_json_reply;

pub const TASK: &str = "notes";
pub const CONTEXT_FILE: &str = "405/context.json";
pub const MAX_STEPS: usize = 33;

const SYSTEM_PROMPT: &str = r##"
[AI Website Navigation Agent]

You are an AI agent tasked with navigating a specific website to answer user questions. Follow the instructions below precisely.

<prompt_objective>
Your purpose is to recursively navigate a specified website, performing deep crawling of all subpages, determine the correct location for each question, retrieve relevant information, store context to avoid redundant visits, and answer subsequent questions effectively.
</prompt_objective>

<tools>
- crawlSite: will crawl the site and return the markdown and links in a format:
    "http://crawled.page.com": {
    "links": ["somelink.com", "somelink2.com"],
    "markdown": "# Markdown content"
  },
  - readContext: will read the saved context and return the context in a format:
    "http://crawled.page.com": {
    "links": ["somelink.com", "somelink2.com"],
    "markdown": "# Markdown content"
  },
</tools>

<prompt_rules>
- Implement deep crawling strategy:
  1. Start with the initial URL
  2. For each page crawled:
     - Store the page content in context
     - Extract all links from the page
     - For each new link that's not in context:
       * Crawl it if it belongs to the same domain
       * Store its content and links
     - Continue this process until either:
       * All relevant links are explored
       * Or you find the answer to all questions
       * Or you reach maximum depth of 5 levels

- Context Management:
  - Before crawling any link, ALWAYS check if it exists in context
  - Mark each crawled page with a "crawled" status
  - Track crawling depth for each path
  - Store whether a page contained relevant information

- Search Strategy:
  NEVER CRAWL links from /loop
  1. First check context for existing answers
  2. If not found, start deep crawling from the main page
  3. For each question without an answer:
     - Continue crawling unexplored links
     - Prioritize links whose text or URL seems relevant to the question
     - Stop crawling a path if depth > 5 or if all child links are explored

- Navigate only within the specified website. DO NOT access external links or unrelated domains.
- For each user question:
  1. Identify the most relevant subpage based on the question.
  2. Visit the subpage and retrieve relevant information.
  3. If no relevant information is found, store the subpage in context as "unhelpful" to avoid revisiting it.
  4. Answer the question concisely using the retrieved data.
- Maintain context by storing:
  - Links visited.
  - Relevant data retrieved.
  - Subpages marked as unhelpful.
- Use stored context to:
  - Avoid revisiting already explored subpages.
  - Inform decisions for subsequent navigation.
- context format:
    "http://crawled.page.com": {
    "links": [],
    "markdown": "# Markdown content"
  },
- user input format:
  {
    "01": "Podaj adres mailowy do firmy SoftoAI",
    "02": "Jaki jest adres interfejsu webowego do sterowania robotami zrealizowanego dla klienta jakim jest firma BanAN?",
    "03": "Jakie dwa certyfikaty jakości ISO otrzymała firma SoftoAI?"
}
- expected final output format:

  {
    "01": "<answer>",
    "02": "<answer>",
    "03": "<answer>"
}

Only finish and return the response when you collect all answers.
</prompt_rules>
"##;

/// 已抓取页面，按来源 URL 存入上下文文件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawledPage {
    pub links: Vec<String>,
    pub markdown: String,
}

pub type CrawlContext = BTreeMap<String, CrawledPage>;

/// 上下文文件的读写；同一进程内的并发抓取按顺序合并
#[derive(Clone)]
pub struct ContextStore {
    storage: Arc<dyn StorageRepository>,
    lock: Arc<Mutex<()>>,
}

impl ContextStore {
    pub fn new(storage: Arc<dyn StorageRepository>) -> Self {
        Self {
            storage,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// 读取上下文；文件缺失或损坏时为空
    pub async fn read(&self) -> CrawlContext {
        match self.storage.get(CONTEXT_FILE).await {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(error = %e, "crawl context is not valid JSON, starting empty");
                CrawlContext::new()
            }),
            Ok(None) => CrawlContext::new(),
            Err(e) => {
                warn!(error = %e, "crawl context unreadable, starting empty");
                CrawlContext::new()
            }
        }
    }

    pub async fn upsert(&self, url: String, page: CrawledPage) -> SolverResult<CrawlContext> {
        let _guard = self.lock.lock().await;
        let mut context = self.read().await;
        context.insert(url, page);
        let data = serde_json::to_vec_pretty(&context)?;
        self.storage.save(CONTEXT_FILE, &data).await?;
        Ok(context)
    }
}

struct CrawlSiteTool {
    crawler: Arc<dyn Crawler>,
    store: ContextStore,
}

#[async_trait]
impl Tool for CrawlSiteTool {
    fn name(&self) -> &str {
        "crawlSite"
    }

    fn description(&self) -> &str {
        "Crawl a page and return the saved context with its markdown and links"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"link": {"type": "string", "description": "link to crawl"}},
            "required": ["link"]
        })
    }

    async fn call(&self, args: Value) -> SolverResult<Value> {
        let raw = string_arg(&args, "link")?;
        let link = Url::parse(&raw)
            .map_err(|e| SolverError::validation(format!("invalid link {}: {}", raw, e)))?;
        info!(%link, "crawling page");

        let page = self
            .crawler
            .scrape(link.as_str(), &[ScrapeFormat::Markdown, ScrapeFormat::Links])
            .await?;
        let markdown = page
            .markdown
            .ok_or_else(|| SolverError::http(format!("no markdown in response for {}", link)))?;
        let source_url = page
            .metadata
            .source_url
            .unwrap_or_else(|| link.to_string());

        let context = self
            .store
            .upsert(
                source_url,
                CrawledPage {
                    links: page.links,
                    markdown,
                },
            )
            .await?;
        Ok(serde_json::to_value(context)?)
    }
}

struct ReadContextTool {
    store: ContextStore,
}

#[async_trait]
impl Tool for ReadContextTool {
    fn name(&self) -> &str {
        "readContext"
    }

    fn description(&self) -> &str {
        "Read the saved context"
    }

    async fn call(&self, _args: Value) -> SolverResult<Value> {
        Ok(serde_json::to_value(self.store.read().await)?)
    }
}

/// 爬取网站回答问题并提交答案
pub async fn execute(ctx: &SolverContext, questions: NotesQuestions) -> SolverResult<Value> {
    if questions.is_empty() {
        return Err(SolverError::validation("no questions given"));
    }

    let store = ContextStore::new(ctx.storage.clone());
    let tools = ToolRegistry::new()
        .with(CrawlSiteTool {
            crawler: ctx.crawler.clone(),
            store: store.clone(),
        })
        .with(ReadContextTool { store });
    let options = AgentOptions {
        max_steps: MAX_STEPS,
        ..AgentOptions::default()
    };

    let input = serde_json::to_string(&questions)?;
    let outcome = Agent::new(ctx.llm.clone(), tools)
        .run(SYSTEM_PROMPT, vec![ChatMessage::user(input)], &options)
        .await?;
    info!(steps = outcome.steps, "site navigator finished");

    let answers = parse_json_reply(&outcome.text).ok_or_else(|| {
        SolverError::validation(format!("navigator answer is not JSON: {}", outcome.text))
    })?;
    ctx.headquarters.report(TASK, answers).await
}
