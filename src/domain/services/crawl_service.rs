// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::settings::FirecrawlSettings;
use crate::utils::errors::{SolverError, SolverResult};

/// 抓取输出格式
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeFormat {
    Markdown,
    Links,
    /// 按 JSON Schema 抽取结构化数据
    Extract(Value),
}

impl ScrapeFormat {
    fn name(&self) -> &'static str {
        match self {
            ScrapeFormat::Markdown => "markdown",
            ScrapeFormat::Links => "links",
            ScrapeFormat::Extract(_) => "extract",
        }
    }
}

/// 单页抓取结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPage {
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub extract: Option<Value>,
    #[serde(default)]
    pub metadata: PageMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(rename = "sourceURL", default)]
    pub source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    success: bool,
    #[serde(default)]
    data: Option<ScrapedPage>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
pub trait Crawler: Send + Sync {
    async fn scrape(&self, url: &str, formats: &[ScrapeFormat]) -> SolverResult<ScrapedPage>;
}

/// Firecrawl v1 客户端
pub struct FirecrawlClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_base_url: String,
}

impl FirecrawlClient {
    pub fn new(client: reqwest::Client, api_key: Option<String>, api_base_url: &str) -> Self {
        Self {
            client,
            api_key,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(client: reqwest::Client, settings: &FirecrawlSettings) -> Self {
        Self::new(client, settings.api_key.clone(), &settings.api_base_url)
    }
}

#[async_trait]
impl Crawler for FirecrawlClient {
    async fn scrape(&self, url: &str, formats: &[ScrapeFormat]) -> SolverResult<ScrapedPage> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SolverError::NotConfigured("firecrawl.api_key"))?;

        let mut body = json!({
            "url": url,
            "formats": formats.iter().map(ScrapeFormat::name).collect::<Vec<_>>(),
        });
        for format in formats {
            if let ScrapeFormat::Extract(schema) = format {
                body["extract"] = json!({ "schema": schema });
            }
        }

        debug!(url, "scraping page");
        let response = self
            .client
            .post(format!("{}/scrape", self.api_base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload: ScrapeResponse = response.json().await?;

        match payload {
            ScrapeResponse {
                success: true,
                data: Some(page),
                ..
            } => Ok(page),
            ScrapeResponse { error, .. } => {
                let reason = error.unwrap_or_else(|| status.to_string());
                warn!(url, %reason, "scrape failed");
                Err(SolverError::http(format!("scrape of {} failed: {}", url, reason)))
            }
        }
    }
}
