// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use crate::domain::models::graph::GraphSnapshot;
use crate::utils::errors::SolverResult;

/// 人物关系图仓库
#[async_trait]
pub trait GraphRepository: Send + Sync {
    /// 合并导入人物节点与 `KNOWS` 关系，返回处理的关系数量
    async fn import(&self, snapshot: &GraphSnapshot) -> SolverResult<usize>;

    /// 两个人物之间的最短路径（忽略关系方向），返回路径上的姓名
    async fn shortest_path(&self, from: &str, to: &str) -> SolverResult<Vec<String>>;
}
