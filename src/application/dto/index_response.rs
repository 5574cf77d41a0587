// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 向量索引结果
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IndexSummary {
    /// 写入的文档数
    pub indexed: usize,
    /// 被索引的文件名
    pub files: Vec<String>,
}
