// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::utils::errors::SolverError;

/// 应用错误类型
///
/// 封装求解流水线的错误，映射为 HTTP 状态码和 `{"error": msg}` 响应体
#[derive(Debug)]
pub struct AppError {
    error: SolverError,
    status: Option<StatusCode>,
}

impl AppError {
    /// 无论错误类型都以 404 返回
    pub fn not_found(error: SolverError) -> Self {
        Self {
            error,
            status: Some(StatusCode::NOT_FOUND),
        }
    }

    pub fn status(&self) -> StatusCode {
        if let Some(status) = self.status {
            return status;
        }
        match self.error {
            SolverError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(
            tag = self.error.tag(),
            status = status.as_u16(),
            error = %self.error,
            "request failed"
        );

        let body = Json(json!({ "error": self.error.to_string() }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<SolverError>,
{
    fn from(err: E) -> Self {
        Self {
            error: err.into(),
            status: None,
        }
    }
}
