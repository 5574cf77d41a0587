// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::presentation::errors::AppError;
use crate::utils::errors::SolverError;

/// JSON 请求体提取器
///
/// 请求体缺失、格式错误或字段类型不符时返回 `400 {"error": msg}`，
/// 而不是 axum 默认的纯文本 4xx 响应
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| SolverError::validation(rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}
