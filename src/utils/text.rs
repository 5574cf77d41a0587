// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\n(.*)\n```").expect("valid fenced json regex"));

static LOOSE_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)json\n(.*)\n").expect("valid loose json regex"));

/// 提取 ```json 代码块中的内容
pub fn extract_fenced_json(text: &str) -> Option<&str> {
    FENCED_JSON
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 解析模型回复中的 JSON
///
/// 优先使用 ```json 代码块，其次是没有反引号的 `json\n...\n` 形式，最后尝试整段文本
pub fn parse_json_reply(text: &str) -> Option<Value> {
    if let Some(block) = extract_fenced_json(text) {
        if let Ok(value) = serde_json::from_str(block) {
            return Some(value);
        }
    }

    if let Some(block) = LOOSE_JSON.captures(text).and_then(|c| c.get(1)) {
        let trimmed = block.as_str().trim().trim_end_matches("```");
        if let Ok(value) = serde_json::from_str(trimmed) {
            return Some(value);
        }
    }

    serde_json::from_str(text.trim()).ok()
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
