// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 写入向量表、图数据库和快照文件的维护路由

use axum::{extract::Extension, Json};
use std::sync::Arc;

use super::{data, run, Data};
use crate::application::context::SolverContext;
use crate::application::dto::IndexSummary;
use crate::application::use_cases::{connections, database_agent, phone, vector_search};
use crate::domain::models::graph::GraphSnapshot;
use crate::presentation::errors::AppError;

type Ctx = Extension<Arc<SolverContext>>;

/// `POST /api/302/index`
pub async fn index_reports(Extension(ctx): Ctx) -> Result<Json<Data<IndexSummary>>, AppError> {
    Ok(data(run("302/index", vector_search::index(&ctx)).await?))
}

/// `POST /api/305/snapshot`
pub async fn snapshot_users(Extension(ctx): Ctx) -> Result<Json<Data<GraphSnapshot>>, AppError> {
    Ok(data(run("305/snapshot", database_agent::snapshot(&ctx)).await?))
}

/// `POST /api/305/import`，返回导入的关系数
pub async fn import_graph(Extension(ctx): Ctx) -> Result<Json<Data<usize>>, AppError> {
    Ok(data(run("305/import", connections::import(&ctx)).await?))
}

/// `POST /api/501/index`
pub async fn index_people(Extension(ctx): Ctx) -> Result<Json<Data<IndexSummary>>, AppError> {
    Ok(data(run("501/index", phone::index(&ctx)).await?))
}
