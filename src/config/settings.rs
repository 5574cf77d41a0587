// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、总部 API、LLM、爬虫、数据库、图数据库和本地存储等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 总部（报告端点 / 数据文件）配置
    pub centrala: CentralaSettings,
    /// xyz 登录/验证站点配置
    pub xyz: XyzSettings,
    /// poligon 练习端点配置
    pub poligon: PoligonSettings,
    /// LLM 配置
    pub llm: LlmSettings,
    /// Firecrawl 爬虫配置
    pub firecrawl: FirecrawlSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 图数据库配置
    pub graph: GraphSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// Webhook 配置，整节可省略
    #[serde(default)]
    pub webhook: WebhookSettings,
    /// Agent 配置
    pub agent: AgentSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 总部配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CentralaSettings {
    /// 基础URL，例如 https://centrala.ag3nts.org
    pub base_url: String,
    /// 报告使用的 API 密钥
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XyzSettings {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoligonSettings {
    pub base_url: String,
}

/// LLM配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// 文本补全提供方 (openai, ollama)
    pub provider: String,
    /// OpenAI API密钥
    pub api_key: Option<String>,
    /// OpenAI 兼容 API 基础URL
    pub api_base_url: String,
    /// 默认模型
    pub model: String,
    /// Ollama 地址
    pub ollama_url: String,
    /// Ollama 模型
    pub ollama_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirecrawlSettings {
    pub api_key: Option<String>,
    pub api_base_url: String,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL，未配置时向量检索相关路由不可用
    pub url: Option<String>,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 图数据库（Neo4j HTTP API）配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct GraphSettings {
    pub url: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 本地任务文件根目录
    pub local_path: String,
}

/// Webhook配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookSettings {
    /// 对外可访问的服务地址，用于向总部注册 webhook
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSettings {
    /// 工具调用循环的默认最大步数
    pub max_steps: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和 `SOLVRS__*` 环境变量，
    /// 最后由 `AI_DEVS_API_KEY` 等常用环境变量覆盖对应的密钥
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SOLVRS").separator("__"))
            .set_override_option("centrala.api_key", std::env::var("AI_DEVS_API_KEY").ok())?
            .set_override_option("llm.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .set_override_option("firecrawl.api_key", std::env::var("FIRECRAWL_API_KEY").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }

    /// 仅包含默认值的配置构建器
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("centrala.base_url", "https://centrala.ag3nts.org")?
            .set_default("centrala.api_key", "")?
            .set_default("xyz.base_url", "https://xyz.ag3nts.org")?
            .set_default("xyz.username", "tester")?
            .set_default("xyz.password", "574e112a")?
            .set_default("poligon.base_url", "https://poligon.aidevs.pl")?
            .set_default("llm.provider", "openai")?
            .set_default("llm.api_base_url", "https://api.openai.com/v1")?
            .set_default("llm.model", "gpt-4o")?
            .set_default("llm.ollama_url", "http://localhost:11434")?
            .set_default("llm.ollama_model", "llama2:7b")?
            .set_default("firecrawl.api_base_url", "https://api.firecrawl.dev/v1")?
            // Default DB pool settings
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("graph.url", "http://localhost:7474")?
            .set_default("graph.database", "neo4j")?
            .set_default("graph.username", "neo4j")?
            .set_default("graph.password", "neo4j")?
            .set_default("storage.local_path", "./data")?
            .set_default("agent.max_steps", 10)?
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    /// 只使用默认值构建配置（测试和脚手架使用）
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
