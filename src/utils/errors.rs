// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::repositories::storage_repository::StorageError;

/// 解题流程错误类型
///
/// `Validation` 与 `Http` 对应外部调用边界上的两种标签：
/// 上游返回的数据结构不符合预期，或者请求本身失败。
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("agent error: {0}")]
    Agent(String),
}

impl SolverError {
    pub fn validation(msg: impl Into<String>) -> Self {
        SolverError::Validation(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        SolverError::Http(msg.into())
    }

    /// 错误标签，记录日志时使用
    pub fn tag(&self) -> &'static str {
        match self {
            SolverError::Validation(_) => "ValidationError",
            SolverError::Http(_) => "HttpError",
            SolverError::Io(_) | SolverError::FileNotFound(_) => "FileError",
            SolverError::Database(_) => "DatabaseError",
            SolverError::NotConfigured(_) => "ConfigError",
            SolverError::Agent(_) => "AgentError",
        }
    }
}

impl From<reqwest::Error> for SolverError {
    fn from(err: reqwest::Error) -> Self {
        SolverError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for SolverError {
    fn from(err: serde_json::Error) -> Self {
        SolverError::Validation(err.to_string())
    }
}

impl From<sea_orm::DbErr> for SolverError {
    fn from(err: sea_orm::DbErr) -> Self {
        SolverError::Database(err.to_string())
    }
}

impl From<StorageError> for SolverError {
    fn from(err: StorageError) -> Self {
        let StorageError::Io(e) = err;
        SolverError::Io(e)
    }
}

pub type SolverResult<T> = Result<T, SolverError>;
