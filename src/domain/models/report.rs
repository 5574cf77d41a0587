// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 发往报告端点的请求体
#[derive(Debug, Clone, Serialize)]
pub struct ReportRequest<'a> {
    pub task: &'a str,
    pub apikey: &'a str,
    pub answer: Value,
}

/// 报告端点的标准回复 `{code, message}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportReply {
    pub code: i64,
    pub message: String,
}

impl ReportReply {
    /// 尝试把任意 JSON 回复解码为标准回复
    pub fn decode(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// 回复中是否带有旗标 `{FLG:...}`
    pub fn has_flag(&self) -> bool {
        self.message.contains("FLG")
    }
}

/// 规范化答案
///
/// 如果答案是一个包含合法 JSON 的字符串，就发送解析后的值；否则原样发送。
/// 这样 `"[1,2]"` 会被当作数组提交，而 `"2024-02-21"` 依旧是字符串。
pub fn normalize_answer(answer: Value) -> Value {
    match &answer {
        Value::String(raw) => {
            let trimmed = raw.trim();
            let looks_structured = trimmed.starts_with('{') || trimmed.starts_with('[');
            if looks_structured {
                serde_json::from_str(trimmed).unwrap_or(answer)
            } else {
                answer
            }
        }
        _ => answer,
    }
}
