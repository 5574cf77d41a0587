// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use tracing::info;

/// 校准文件（instructions.json）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationFile {
    pub apikey: String,
    pub description: String,
    pub copyright: String,
    #[serde(rename = "test-data")]
    pub test_data: Vec<CalibrationItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationItem {
    pub question: String,
    pub answer: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<OpenQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenQuestion {
    pub q: String,
    pub a: String,
}

/// 计算 "a + b" 形式的问题；无法解析或溢出时返回 None
pub fn evaluate_sum(question: &str) -> Option<i64> {
    let (left, right) = question.split_once(" + ")?;
    let left: i64 = left.trim().parse().ok()?;
    let right: i64 = right.trim().parse().ok()?;
    left.checked_add(right)
}

impl CalibrationFile {
    /// 修正所有加法题的答案并写入新的 API 密钥
    pub fn fix_computations(mut self, api_key: &str) -> Self {
        for item in self.test_data.iter_mut() {
            if let Some(correct) = evaluate_sum(&item.question) {
                if item.answer != correct {
                    info!(
                        "Correcting answer for question \"{}\": {} -> {}",
                        item.question, item.answer, correct
                    );
                    item.answer = correct;
                }
            }
        }
        self.apikey = api_key.to_string();
        self
    }

    /// 需要 LLM 回答的开放问题数量
    pub fn open_questions(&self) -> usize {
        self.test_data.iter().filter(|i| i.test.is_some()).count()
    }
}

#[cfg(test)]
#[path = "calibration_test.rs"]
mod tests;
