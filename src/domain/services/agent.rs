// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::services::llm_service::{ChatMessage, ChatOptions, LlmService, ToolSpec};
use crate::utils::errors::{SolverError, SolverResult};

/// 代理可以调用的工具
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// 参数的 JSON Schema
    fn parameters(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn call(&self, args: Value) -> SolverResult<Value>;
}

/// 工具注册表
///
/// 工具执行失败不会中断代理循环，错误以 `{"error": msg}` 的形式交还给模型
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.register(Arc::new(tool));
        self
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// 工具描述，按名称排序
    pub fn specs(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self
            .tools
            .values()
            .map(|tool| ToolSpec {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters(),
            })
            .collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// 执行一次工具调用，`arguments` 为模型给出的 JSON 字符串
    pub async fn execute(&self, name: &str, arguments: &str) -> Value {
        let Some(tool) = self.tools.get(name) else {
            warn!(tool = name, "unknown tool requested");
            return json!({ "error": format!("unknown tool: {}", name) });
        };

        let args = if arguments.trim().is_empty() {
            json!({})
        } else {
            match serde_json::from_str(arguments) {
                Ok(args) => args,
                Err(e) => return json!({ "error": format!("invalid arguments: {}", e) }),
            }
        };

        match tool.call(args).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = name, error = %e, "tool failed");
                json!({ "error": e.to_string() })
            }
        }
    }
}

/// 代理运行参数
#[derive(Debug, Clone)]
pub struct AgentOptions {
    pub max_steps: usize,
    pub temperature: f32,
    pub model: Option<String>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            max_steps: 10,
            temperature: 0.0,
            model: None,
        }
    }
}

/// 代理最终结果
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutcome {
    /// 最后一步的文本
    pub text: String,
    /// 实际执行的步数
    pub steps: usize,
}

/// 工具调用循环
///
/// 每一步把完整对话与工具描述发给模型；模型请求工具时并发执行并把结果追加为 `tool` 消息，
/// 否则模型的文本即为最终答案
pub struct Agent {
    llm: Arc<dyn LlmService>,
    tools: ToolRegistry,
}

impl Agent {
    pub fn new(llm: Arc<dyn LlmService>, tools: ToolRegistry) -> Self {
        Self { llm, tools }
    }

    pub async fn run(
        &self,
        system: &str,
        messages: Vec<ChatMessage>,
        options: &AgentOptions,
    ) -> SolverResult<AgentOutcome> {
        let specs = self.tools.specs();
        let chat_options = ChatOptions {
            model: options.model.clone(),
            temperature: options.temperature,
            ..ChatOptions::default()
        };

        let mut conversation = Vec::with_capacity(messages.len() + 1);
        if !system.is_empty() {
            conversation.push(ChatMessage::system(system));
        }
        conversation.extend(messages);

        for step in 1..=options.max_steps {
            let reply = self.llm.chat(&conversation, &specs, &chat_options).await?;

            if reply.tool_calls.is_empty() {
                info!(step, "agent finished");
                return Ok(AgentOutcome {
                    text: reply.content.unwrap_or_default(),
                    steps: step,
                });
            }

            debug!(step, calls = reply.tool_calls.len(), "executing tool calls");
            let calls = reply.tool_calls.clone();
            conversation.push(reply.into_message());

            let results = futures::future::join_all(calls.iter().map(|call| {
                self.tools
                    .execute(&call.function.name, &call.function.arguments)
            }))
            .await;

            for (call, result) in calls.into_iter().zip(results) {
                conversation.push(ChatMessage::Tool {
                    tool_call_id: call.id,
                    content: result.to_string(),
                });
            }
        }

        Err(SolverError::Agent(format!(
            "max steps ({}) reached",
            options.max_steps
        )))
    }
}

#[cfg(test)]
#[path = "agent_test.rs"]
mod tests;
