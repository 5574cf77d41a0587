// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Json;
use serde::Serialize;
use std::future::Future;
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::utils::errors::SolverResult;

pub mod index_handler;
pub mod solver_handler;
pub mod webhook_handler;

/// 成功响应 `{"data": ...}`
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

pub fn data<T: Serialize>(data: T) -> Json<Data<T>> {
    Json(Data { data })
}

/// 在带运行 ID 的 span 中执行一次求解
pub async fn run<T, F>(route: &'static str, pipeline: F) -> SolverResult<T>
where
    F: Future<Output = SolverResult<T>>,
{
    let run_id = Uuid::new_v4();
    let span = info_span!("solver", route, %run_id);

    async move {
        let started = Instant::now();
        let result = pipeline.await;
        info!(
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "solver finished"
        );
        result
    }
    .instrument(span)
    .await
}
