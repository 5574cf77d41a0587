// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::settings::Settings;
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::domain::repositories::graph_repository::GraphRepository;
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::domain::services::agent::AgentOptions;
use crate::domain::services::crawl_service::{Crawler, FirecrawlClient};
use crate::domain::services::headquarters_service::{CentralaClient, Headquarters};
use crate::domain::services::llm_service::{create_llm_service, LlmService};
use crate::infrastructure::repositories::document_repo_impl::{PgVectorRepository, VectorTable};
use crate::infrastructure::repositories::neo4j_graph_repo::Neo4jGraphRepository;
use crate::infrastructure::storage::LocalStorage;
use crate::utils::errors::{SolverError, SolverResult};

/// 所有路由共享的协作者
///
/// 启动后不可变，通过 `Extension<Arc<SolverContext>>` 注入处理器
pub struct SolverContext {
    pub settings: Arc<Settings>,
    pub http: reqwest::Client,
    pub llm: Arc<dyn LlmService>,
    pub headquarters: Arc<dyn Headquarters>,
    pub crawler: Arc<dyn Crawler>,
    pub storage: Arc<dyn StorageRepository>,
    pub graph: Arc<dyn GraphRepository>,
    /// 报告向量表，未配置数据库时为空
    pub documents: Option<Arc<dyn DocumentRepository>>,
    /// 人物向量表，未配置数据库时为空
    pub people: Option<Arc<dyn DocumentRepository>>,
}

impl SolverContext {
    /// 按配置创建真实的外部服务客户端
    pub fn from_settings(settings: Settings, db: Option<Arc<DatabaseConnection>>) -> Self {
        let http = reqwest::Client::new();

        let documents = db.as_ref().map(|db| {
            Arc::new(PgVectorRepository::new(db.clone(), VectorTable::Documents))
                as Arc<dyn DocumentRepository>
        });
        let people = db.map(|db| {
            Arc::new(PgVectorRepository::new(db, VectorTable::People))
                as Arc<dyn DocumentRepository>
        });

        Self {
            llm: create_llm_service(http.clone(), &settings.llm),
            headquarters: Arc::new(CentralaClient::from_settings(http.clone(), &settings.centrala)),
            crawler: Arc::new(FirecrawlClient::from_settings(http.clone(), &settings.firecrawl)),
            storage: Arc::new(LocalStorage::from_settings(&settings.storage)),
            graph: Arc::new(Neo4jGraphRepository::new(http.clone(), &settings.graph)),
            documents,
            people,
            http,
            settings: Arc::new(settings),
        }
    }

    pub fn documents(&self) -> SolverResult<&dyn DocumentRepository> {
        self.documents
            .as_deref()
            .ok_or(SolverError::NotConfigured("database.url"))
    }

    pub fn people(&self) -> SolverResult<&dyn DocumentRepository> {
        self.people
            .as_deref()
            .ok_or(SolverError::NotConfigured("database.url"))
    }

    /// 默认的代理参数
    pub fn agent_options(&self) -> AgentOptions {
        AgentOptions {
            max_steps: self.settings.agent.max_steps,
            ..AgentOptions::default()
        }
    }

    pub async fn read_bytes(&self, key: &str) -> SolverResult<Vec<u8>> {
        self.storage
            .get(key)
            .await?
            .ok_or_else(|| SolverError::FileNotFound(key.to_string()))
    }

    pub async fn read_text(&self, key: &str) -> SolverResult<String> {
        let bytes = self.read_bytes(key).await?;
        String::from_utf8(bytes)
            .map_err(|e| SolverError::validation(format!("{} is not UTF-8: {}", key, e)))
    }

    pub async fn read_json<T: DeserializeOwned>(&self, key: &str) -> SolverResult<T> {
        let text = self.read_text(key).await?;
        serde_json::from_str(&text)
            .map_err(|e| SolverError::validation(format!("{} has unexpected shape: {}", key, e)))
    }

    pub async fn write_json<T: serde::Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> SolverResult<()> {
        let data = serde_json::to_vec_pretty(value)?;
        self.storage.save(key, &data).await?;
        Ok(())
    }
}
