// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::settings::LlmSettings;
use crate::utils::errors::{SolverError, SolverResult};

const TRANSCRIPTION_MODEL: &str = "whisper-1";
const IMAGE_MODEL: &str = "dall-e-3";
const EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// 对话消息，按 OpenAI chat/completions 的格式序列化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System {
        content: String,
    },
    User {
        content: MessageContent,
    },
    Assistant {
        #[serde(default)]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage::System {
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage::User {
            content: MessageContent::Text(content.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// 模型发起的工具调用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: FunctionCall,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON 编码的参数
    #[serde(default)]
    pub arguments: String,
}

/// 提供给模型的工具描述
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSpec {
    fn to_request(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

/// 单次对话请求的参数
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    /// 覆盖默认模型
    pub model: Option<String>,
    pub temperature: f32,
    /// 要求模型返回 JSON 对象
    pub json_mode: bool,
    pub max_tokens: Option<u32>,
}

impl ChatOptions {
    /// 指定模型，其余取默认值
    pub fn for_model(model: &str) -> Self {
        Self {
            model: Some(model.to_string()),
            ..Self::default()
        }
    }
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.0,
            json_mode: false,
            max_tokens: None,
        }
    }
}

/// 模型回复：文本或工具调用
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

impl AssistantReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    pub fn into_message(self) -> ChatMessage {
        ChatMessage::Assistant {
            content: self.content,
            tool_calls: self.tool_calls,
        }
    }
}

/// 图片转写提示词
pub const IMAGE_TRANSCRIPTION_PROMPT: &str = "
<prompt_objective>
transcript text from image
</prompt_objective>

<prompt_rules>
- ABSOLUTELY FORBIDDEN to include any comment or notes
- Always return text visible in the image
</prompt_rules>
";

#[async_trait]
pub trait LlmService: Send + Sync {
    /// chat/completions，可携带工具
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
        options: &ChatOptions,
    ) -> SolverResult<AssistantReply>;

    /// 音频转写（whisper，纯文本输出）
    async fn transcribe(&self, file_name: &str, audio: Vec<u8>) -> SolverResult<String>;

    /// 生成图片并返回其 URL
    async fn generate_image(&self, prompt: &str) -> SolverResult<String>;

    /// 文本嵌入（1536 维）
    async fn embed(&self, input: &str) -> SolverResult<Vec<f32>>;

    /// 单条用户提示词的文本补全
    async fn complete(&self, prompt: &str) -> SolverResult<String> {
        self.complete_with(prompt, &ChatOptions::default()).await
    }

    /// 使用指定参数的文本补全
    async fn complete_with(&self, prompt: &str, options: &ChatOptions) -> SolverResult<String> {
        let reply = self
            .chat(&[ChatMessage::user(prompt)], &[], options)
            .await?;
        Ok(reply.content.unwrap_or_default())
    }

    /// 带系统提示词的 JSON 模式补全
    async fn complete_json(&self, system: &str, user: &str) -> SolverResult<Value> {
        let options = ChatOptions {
            json_mode: true,
            ..ChatOptions::default()
        };
        let reply = self
            .chat(
                &[ChatMessage::system(system), ChatMessage::user(user)],
                &[],
                &options,
            )
            .await?;
        let content = reply.content.unwrap_or_default();
        Ok(serde_json::from_str(&content)?)
    }

    /// 使用视觉模型读取图片
    async fn read_image(&self, prompt: &str, image: &[u8]) -> SolverResult<String> {
        let message = ChatMessage::User {
            content: MessageContent::Parts(vec![
                ContentPart::Text {
                    text: prompt.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:image/jpeg;base64,{}", STANDARD.encode(image)),
                    },
                },
            ]),
        };
        let options = ChatOptions {
            max_tokens: Some(300),
            ..ChatOptions::default()
        };
        let reply = self.chat(&[message], &[], &options).await?;
        Ok(reply.content.unwrap_or_default())
    }
}

/// OpenAI 兼容 API 的实现
pub struct OpenAiService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base_url: String,
}

impl OpenAiService {
    pub fn new(
        client: reqwest::Client,
        api_key: Option<String>,
        model: String,
        api_base_url: String,
    ) -> Self {
        Self {
            client,
            api_key,
            model,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(client: reqwest::Client, settings: &LlmSettings) -> Self {
        Self::new(
            client,
            settings.api_key.clone(),
            settings.model.clone(),
            settings.api_base_url.clone(),
        )
    }

    fn api_key(&self) -> SolverResult<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(SolverError::NotConfigured("llm.api_key"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path)
    }

    async fn send(
        &self,
        kind: &'static str,
        request: reqwest::RequestBuilder,
    ) -> SolverResult<reqwest::Response> {
        metrics::counter!("solvrs_llm_requests_total", "kind" => kind).increment(1);

        let response = request.bearer_auth(self.api_key()?).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!(kind, %status, "LLM API returned error");
            return Err(SolverError::http(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl LlmService for OpenAiService {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
        options: &ChatOptions,
    ) -> SolverResult<AssistantReply> {
        let mut body = json!({
            "model": options.model.as_deref().unwrap_or(&self.model),
            "messages": messages,
            "temperature": options.temperature,
        });
        if !tools.is_empty() {
            body["tools"] = tools.iter().map(ToolSpec::to_request).collect();
        }
        if options.json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }
        if let Some(max_tokens) = options.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        let response = self
            .send("chat", self.client.post(self.url("chat/completions")).json(&body))
            .await?;
        let mut payload: Value = response.json().await?;

        let message = payload["choices"][0]["message"].take();
        if message.is_null() {
            return Err(SolverError::validation(
                "Invalid response format from LLM API",
            ));
        }

        let reply: AssistantReply = serde_json::from_value(message)?;
        debug!(
            tool_calls = reply.tool_calls.len(),
            "LLM replied"
        );
        Ok(reply)
    }

    async fn transcribe(&self, file_name: &str, audio: Vec<u8>) -> SolverResult<String> {
        let form = Form::new()
            .part("file", Part::bytes(audio).file_name(file_name.to_string()))
            .text("model", TRANSCRIPTION_MODEL)
            .text("response_format", "text");

        let response = self
            .send(
                "transcription",
                self.client
                    .post(self.url("audio/transcriptions"))
                    .multipart(form),
            )
            .await?;

        Ok(response.text().await?)
    }

    async fn generate_image(&self, prompt: &str) -> SolverResult<String> {
        let body = json!({
            "model": IMAGE_MODEL,
            "prompt": prompt,
            "n": 1,
            "size": "1024x1024",
        });

        let response = self
            .send("image", self.client.post(self.url("images/generations")).json(&body))
            .await?;
        let payload: Value = response.json().await?;

        payload["data"][0]["url"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| SolverError::validation("image response has no url"))
    }

    async fn embed(&self, input: &str) -> SolverResult<Vec<f32>> {
        let body = json!({
            "model": EMBEDDING_MODEL,
            "input": input,
        });

        let response = self
            .send("embedding", self.client.post(self.url("embeddings")).json(&body))
            .await?;
        let mut payload: Value = response.json().await?;

        Ok(serde_json::from_value(
            payload["data"][0]["embedding"].take(),
        )?)
    }
}

/// 本地 Ollama 文本补全
///
/// 只接管 `complete`，其余能力仍交给 OpenAI 兼容实现
pub struct OllamaService {
    client: reqwest::Client,
    url: String,
    model: String,
    inner: Arc<dyn LlmService>,
}

impl OllamaService {
    pub fn new(
        client: reqwest::Client,
        url: String,
        model: String,
        inner: Arc<dyn LlmService>,
    ) -> Self {
        Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            model,
            inner,
        }
    }
}

#[async_trait]
impl LlmService for OllamaService {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
        options: &ChatOptions,
    ) -> SolverResult<AssistantReply> {
        self.inner.chat(messages, tools, options).await
    }

    async fn transcribe(&self, file_name: &str, audio: Vec<u8>) -> SolverResult<String> {
        self.inner.transcribe(file_name, audio).await
    }

    async fn generate_image(&self, prompt: &str) -> SolverResult<String> {
        self.inner.generate_image(prompt).await
    }

    async fn embed(&self, input: &str) -> SolverResult<Vec<f32>> {
        self.inner.embed(input).await
    }

    async fn complete(&self, prompt: &str) -> SolverResult<String> {
        metrics::counter!("solvrs_llm_requests_total", "kind" => "ollama").increment(1);

        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });
        let response = self
            .client
            .post(format!("{}/api/generate", self.url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let payload: Value = response.json().await?;

        payload["response"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| SolverError::validation("ollama response has no text"))
    }
}

/// 按 `llm.provider` 创建服务
pub fn create_llm_service(client: reqwest::Client, settings: &LlmSettings) -> Arc<dyn LlmService> {
    let openai: Arc<dyn LlmService> =
        Arc::new(OpenAiService::from_settings(client.clone(), settings));

    match settings.provider.as_str() {
        "ollama" => Arc::new(OllamaService::new(
            client,
            settings.ollama_url.clone(),
            settings.ollama_model.clone(),
            openai,
        )),
        _ => openai,
    }
}

#[cfg(test)]
#[path = "llm_service_test.rs"]
mod tests;
