// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use futures::future::try_join_all;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::application::context::SolverContext;
use crate::application::dto::IndexSummary;
use crate::domain::models::document::{
    parse_person_file, parse_report_file, DocumentContent, NewDocument,
};
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::utils::errors::{SolverError, SolverResult};

pub const TASK: &str = "wektory";
pub const REPORTS_DIR: &str = "302/reports";
pub const QUESTION: &str =
    "W raporcie, z którego dnia znajduje się wzmianka o kradzieży prototypu broni?";
pub const SIMILARITY_THRESHOLD: f64 = 0.85;
pub const SEARCH_LIMIT: u64 = 5;

async fn embed_and_insert(
    ctx: &SolverContext,
    repository: &dyn DocumentRepository,
    content: DocumentContent,
) -> SolverResult<()> {
    let embedding = ctx.llm.embed(&content.description).await?;
    repository
        .insert(NewDocument {
            title: content.title,
            description: content.description,
            date: content.date,
            embedding,
        })
        .await
}

/// 把一个目录下的文件逐个解析、向量化后写入向量表
pub async fn index_directory<F>(
    ctx: &SolverContext,
    repository: &dyn DocumentRepository,
    dir: &str,
    parse: F,
) -> SolverResult<IndexSummary>
where
    F: Fn(&str, &str) -> SolverResult<DocumentContent>,
{
    let names = ctx.storage.list(dir).await?;
    let mut documents = Vec::with_capacity(names.len());
    for name in &names {
        let text = ctx.read_text(&format!("{}/{}", dir, name)).await?;
        documents.push(parse(&text, name)?);
    }

    try_join_all(
        documents
            .into_iter()
            .map(|content| embed_and_insert(ctx, repository, content)),
    )
    .await?;
    info!(dir, indexed = names.len(), "directory indexed");

    Ok(IndexSummary {
        indexed: names.len(),
        files: names,
    })
}

/// 索引 `302/reports` 下的报告
pub async fn index(ctx: &SolverContext) -> SolverResult<IndexSummary> {
    let documents = ctx.documents()?;
    index_directory(ctx, documents, REPORTS_DIR, parse_report_file).await
}

/// 索引人物档案
pub async fn index_people(ctx: &SolverContext, dir: &str) -> SolverResult<IndexSummary> {
    let people = ctx.people()?;
    index_directory(ctx, people, dir, |text, _| Ok(parse_person_file(text))).await
}

/// 用固定问题检索最相近的报告，提交其日期
pub async fn execute(ctx: &SolverContext) -> SolverResult<Value> {
    let documents = ctx.documents()?;
    let query = ctx.llm.embed(QUESTION).await?;

    let matches = documents
        .search(&query, SIMILARITY_THRESHOLD, SEARCH_LIMIT)
        .await?;
    let best = matches.into_iter().next().ok_or_else(|| {
        warn!("no report above similarity threshold");
        SolverError::validation("no report matches the question")
    })?;
    info!(title = %best.title, similarity = best.similarity, "best match");

    let date = best
        .date
        .ok_or_else(|| SolverError::validation(format!("report {} has no date", best.title)))?;

    ctx.headquarters.report(TASK, json!(date)).await
}
