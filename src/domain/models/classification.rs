// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 文件分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    People,
    Hardware,
    Other,
}

impl Category {
    /// 解析模型回复；除 people / hardware 以外一律视为 Other
    pub fn from_reply(reply: &str) -> Self {
        let normalized = reply
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '.')
            .to_lowercase();
        match normalized.as_str() {
            "people" => Category::People,
            "hardware" => Category::Hardware,
            _ => Category::Other,
        }
    }
}

/// 单个文件的分类
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub file_name: String,
    pub category: Category,
}

/// 提交给报告端点的分类答案
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Categories {
    pub people: Vec<String>,
    pub hardware: Vec<String>,
}

impl Categories {
    pub fn collect(items: impl IntoIterator<Item = Classified>) -> Self {
        let mut acc = Categories::default();
        for item in items {
            match item.category {
                Category::People => acc.people.push(item.file_name),
                Category::Hardware => acc.hardware.push(item.file_name),
                Category::Other => {}
            }
        }
        acc.people.sort();
        acc.hardware.sort();
        acc
    }
}
