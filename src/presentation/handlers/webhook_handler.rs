// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 接收外部请求体的路由

use axum::{extract::Extension, Json};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use super::{data, run, Data};
use crate::application::context::SolverContext;
use crate::application::dto::{DroneInstruction, DroneReply, NotesQuestions};
use crate::application::use_cases::{drone, site_navigator};
use crate::presentation::errors::AppError;
use crate::presentation::extractors::JsonBody;
use crate::utils::errors::SolverError;

type Ctx = Extension<Arc<SolverContext>>;

/// `GET /api/403`：向总部注册 webhook
pub async fn register_drone_webhook(Extension(ctx): Ctx) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("403", drone::register(&ctx)).await?))
}

/// `POST /api/403`：总部回调，直接返回 `{description}`
pub async fn describe_drone_position(
    Extension(ctx): Ctx,
    JsonBody(payload): JsonBody<DroneInstruction>,
) -> Result<Json<DroneReply>, AppError> {
    payload
        .validate()
        .map_err(|e| SolverError::validation(e.to_string()))?;
    Ok(Json(run("403/webhook", drone::describe(&ctx, payload)).await?))
}

/// `POST /api/405`
pub async fn answer_notes(
    Extension(ctx): Ctx,
    JsonBody(questions): JsonBody<NotesQuestions>,
) -> Result<Json<Data<Value>>, AppError> {
    Ok(data(run("405", site_navigator::execute(&ctx, questions)).await?))
}
