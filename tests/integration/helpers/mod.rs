// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use solvrs::application::context::SolverContext;
use solvrs::config::settings::Settings;
use solvrs::domain::models::document::{NewDocument, ScoredDocument};
use solvrs::domain::repositories::document_repository::DocumentRepository;
use solvrs::domain::services::crawl_service::FirecrawlClient;
use solvrs::domain::services::headquarters_service::CentralaClient;
use solvrs::domain::services::llm_service::{
    AssistantReply, ChatMessage, ChatOptions, ContentPart, FunctionCall, LlmService,
    MessageContent, ToolCall, ToolSpec,
};
use solvrs::infrastructure::repositories::neo4j_graph_repo::Neo4jGraphRepository;
use solvrs::infrastructure::storage::InMemoryStorage;
use solvrs::presentation::routes;
use solvrs::utils::errors::{SolverError, SolverResult};
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";

type Responder = Box<dyn Fn(&str) -> String + Send + Sync>;

/// 测试用模型：先按顺序返回预设回复，用完后交给 responder 按提示词作答
pub struct ScriptedLlm {
    replies: Mutex<Vec<AssistantReply>>,
    responder: Option<Responder>,
    seen: Mutex<Vec<String>>,
    models: Mutex<Vec<Option<String>>>,
}

impl ScriptedLlm {
    pub fn new(mut replies: Vec<AssistantReply>) -> Self {
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            responder: None,
            seen: Mutex::new(Vec::new()),
            models: Mutex::new(Vec::new()),
        }
    }

    pub fn texts(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| AssistantReply::text(*r)).collect())
    }

    pub fn responding(responder: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            responder: Some(Box::new(responder)),
            seen: Mutex::new(Vec::new()),
            models: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    /// 每次对话请求的模型覆盖
    pub fn models(&self) -> Vec<Option<String>> {
        self.models.lock().unwrap().clone()
    }
}

/// 最后一条用户消息的文本
pub fn last_user_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .rev()
        .find_map(|message| match message {
            ChatMessage::User {
                content: MessageContent::Text(text),
            } => Some(text.clone()),
            ChatMessage::User {
                content: MessageContent::Parts(parts),
            } => parts.iter().find_map(|part| match part {
                ContentPart::Text { text } => Some(text.clone()),
                _ => None,
            }),
            _ => None,
        })
        .unwrap_or_default()
}

pub fn tool_call(id: &str, name: &str, arguments: serde_json::Value) -> AssistantReply {
    AssistantReply {
        content: None,
        tool_calls: vec![ToolCall {
            id: id.to_string(),
            kind: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }],
    }
}

#[async_trait]
impl LlmService for ScriptedLlm {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        _tools: &[ToolSpec],
        options: &ChatOptions,
    ) -> SolverResult<AssistantReply> {
        let prompt = last_user_text(messages);
        self.seen.lock().unwrap().push(prompt.clone());
        self.models.lock().unwrap().push(options.model.clone());

        if let Some(reply) = self.replies.lock().unwrap().pop() {
            return Ok(reply);
        }
        match &self.responder {
            Some(responder) => Ok(AssistantReply::text(responder(&prompt))),
            None => Err(SolverError::Agent("script exhausted".into())),
        }
    }

    async fn transcribe(&self, file_name: &str, _audio: Vec<u8>) -> SolverResult<String> {
        Ok(format!("transcript of {}", file_name))
    }

    async fn generate_image(&self, _prompt: &str) -> SolverResult<String> {
        Ok("https://images.test/robot.png".to_string())
    }

    async fn embed(&self, _input: &str) -> SolverResult<Vec<f32>> {
        Ok(vec![0.1, 0.2, 0.3])
    }
}

/// 内存向量表：记录写入的文档，检索时按阈值过滤预设的命中
#[derive(Default)]
pub struct InMemoryDocuments {
    inserted: Mutex<Vec<NewDocument>>,
    hits: Vec<ScoredDocument>,
}

impl InMemoryDocuments {
    pub fn with_hits(hits: Vec<ScoredDocument>) -> Self {
        Self {
            inserted: Mutex::new(Vec::new()),
            hits,
        }
    }

    pub fn inserted(&self) -> Vec<NewDocument> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocuments {
    async fn insert(&self, document: NewDocument) -> SolverResult<()> {
        self.inserted.lock().unwrap().push(document);
        Ok(())
    }

    async fn search(
        &self,
        _embedding: &[f32],
        threshold: f64,
        limit: u64,
    ) -> SolverResult<Vec<ScoredDocument>> {
        let mut hits: Vec<ScoredDocument> = self
            .hits
            .iter()
            .filter(|hit| hit.similarity > threshold)
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(limit as usize);
        Ok(hits)
    }

    async fn titles(&self) -> SolverResult<Vec<String>> {
        Ok(self.hits.iter().map(|hit| hit.title.clone()).collect())
    }

    async fn find_description(&self, title_fragment: &str) -> SolverResult<Option<String>> {
        let fragment = title_fragment.to_lowercase();
        Ok(self
            .hits
            .iter()
            .find(|hit| hit.title.to_lowercase().contains(&fragment))
            .map(|hit| hit.description.clone()))
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub remote: MockServer,
    pub llm: Arc<ScriptedLlm>,
    pub storage: InMemoryStorage,
}

/// 所有外部 HTTP 服务都指向同一个 wiremock 实例
pub async fn create_test_app(llm: ScriptedLlm, storage: InMemoryStorage) -> TestApp {
    create_test_app_with_documents(llm, storage, None).await
}

/// 同 `create_test_app`，报告表和人物表都使用给定的内存向量表
pub async fn create_test_app_with_documents(
    llm: ScriptedLlm,
    storage: InMemoryStorage,
    documents: Option<Arc<InMemoryDocuments>>,
) -> TestApp {
    let remote = MockServer::start().await;
    let uri = remote.uri();

    let mut settings = Settings::defaults().expect("default settings");
    settings.centrala.base_url = uri.clone();
    settings.centrala.api_key = API_KEY.to_string();
    settings.xyz.base_url = uri.clone();
    settings.poligon.base_url = uri.clone();
    settings.graph.url = uri.clone();
    settings.webhook.public_url = Some("https://solver.test".to_string());

    let http = reqwest::Client::new();
    let llm = Arc::new(llm);
    let ctx = SolverContext {
        llm: llm.clone(),
        headquarters: Arc::new(CentralaClient::new(http.clone(), &uri, API_KEY)),
        crawler: Arc::new(FirecrawlClient::new(
            http.clone(),
            Some("fc-test".to_string()),
            &uri,
        )),
        storage: Arc::new(storage.clone()),
        graph: Arc::new(Neo4jGraphRepository::new(http.clone(), &settings.graph)),
        documents: documents
            .clone()
            .map(|repo| repo as Arc<dyn DocumentRepository>),
        people: documents.map(|repo| repo as Arc<dyn DocumentRepository>),
        http,
        settings: Arc::new(settings),
    };

    let server = TestServer::new(routes::routes(Arc::new(ctx))).unwrap();

    TestApp {
        server,
        remote,
        llm,
        storage,
    }
}
