// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::json;
use tracing::{info, warn};

use crate::application::context::SolverContext;
use crate::domain::services::crawl_service::ScrapeFormat;
use crate::domain::services::llm_service::ChatOptions;
use crate::utils::errors::SolverResult;

/// 抓取失败或页面上没有问题时的默认答案
pub const FALLBACK_ANSWER: &str = "1945";
const MODEL: &str = "gpt-4-turbo";

fn prompt(question: &str) -> String {
    format!(
        r#"<instructions>answer the  question  <question_content>
      {}
    </question_content>  If there is no question, return "1945"
    return only answer to question. Return only number. Do not return any other text.
</instructions>
"#,
        question
    )
}

/// 读取登录页上的防机器人问题，回答后提交登录表单
pub async fn execute(ctx: &SolverContext) -> SolverResult<String> {
    let xyz = &ctx.settings.xyz;
    let site = format!("{}/", xyz.base_url.trim_end_matches('/'));

    let schema = json!({
        "type": "object",
        "properties": {"question": {"type": "string"}},
        "required": ["question"]
    });

    let question = match ctx.crawler.scrape(&site, &[ScrapeFormat::Extract(schema)]).await {
        Ok(page) => page
            .extract
            .and_then(|extract| extract["question"].as_str().map(str::to_string)),
        Err(e) => {
            warn!(error = %e, "login page scrape failed, using fallback answer");
            None
        }
    };

    let answer = match question {
        Some(question) => {
            info!(%question, "login question found");
            ctx.llm
                .complete_with(&prompt(&question), &ChatOptions::for_model(MODEL))
                .await?
                .trim()
                .to_string()
        }
        None => FALLBACK_ANSWER.to_string(),
    };

    let response = ctx
        .http
        .post(&site)
        .form(&[
            ("username", xyz.username.as_str()),
            ("password", xyz.password.as_str()),
            ("answer", answer.as_str()),
        ])
        .send()
        .await?;

    Ok(response.text().await?)
}
