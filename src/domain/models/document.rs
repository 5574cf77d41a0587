// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::errors::{SolverError, SolverResult};

/// 待写入向量库的文档
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub embedding: Vec<f32>,
}

/// 相似度检索结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`（Europe/Warsaw）
    pub date: Option<String>,
    pub similarity: f64,
}

/// 尚未生成嵌入的文档内容
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentContent {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
}

/// 解析报告文件：首个非空行是标题，其余为正文，日期来自文件名 `YYYY_MM_DD.txt`
pub fn parse_report_file(content: &str, file_name: &str) -> SolverResult<DocumentContent> {
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    let title = lines
        .first()
        .map(|l| l.to_string())
        .ok_or_else(|| SolverError::validation(format!("{} is empty", file_name)))?;

    Ok(DocumentContent {
        title,
        description: lines[1..].join("\n").trim().to_string(),
        date: Some(parse_report_date(file_name)?),
    })
}

pub fn parse_report_date(file_name: &str) -> SolverResult<NaiveDate> {
    let stem = file_name.trim_end_matches(".txt");
    NaiveDate::parse_from_str(stem, "%Y_%m_%d")
        .map_err(|e| SolverError::validation(format!("bad report file name {}: {}", file_name, e)))
}

/// 解析人物资料：前两个词为姓名（标题），其余为描述
pub fn parse_person_file(content: &str) -> DocumentContent {
    let words: Vec<&str> = content.split_whitespace().collect();
    let split = words.len().min(2);

    DocumentContent {
        title: words[..split].join(" "),
        description: words[split..].join(" "),
        date: None,
    }
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
