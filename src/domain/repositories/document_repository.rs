// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::domain::models::document::{NewDocument, ScoredDocument};
use crate::utils::errors::SolverResult;

/// 向量文档仓库
///
/// 同一接口同时服务于报告表 `documents` 和人物表 `people`
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// 写入一条带嵌入的文档
    async fn insert(&self, document: NewDocument) -> SolverResult<()>;

    /// 余弦相似度检索，只返回相似度大于 `threshold` 的前 `limit` 条，按相似度降序
    async fn search(
        &self,
        embedding: &[f32],
        threshold: f64,
        limit: u64,
    ) -> SolverResult<Vec<ScoredDocument>>;

    /// 所有文档标题
    async fn titles(&self) -> SolverResult<Vec<String>>;

    /// 标题模糊匹配（不区分大小写）的第一条文档描述
    async fn find_description(&self, title_fragment: &str) -> SolverResult<Option<String>>;
}
