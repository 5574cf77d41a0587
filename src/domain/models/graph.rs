// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 人物及其单向“认识”关系
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphUser {
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub knows: Vec<i64>,
}

/// 导入文件 `{users: [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub users: Vec<GraphUser>,
}

impl GraphSnapshot {
    pub fn edge_count(&self) -> usize {
        self.users.iter().map(|u| u.knows.len()).sum()
    }
}
