// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{json, Value};

use crate::application::context::SolverContext;
use crate::utils::errors::SolverResult;

pub const TASK: &str = "research";
pub const CORRECT_SAMPLES: [&str; 3] = ["01", "02", "10"];

pub async fn execute(ctx: &SolverContext) -> SolverResult<Value> {
    ctx.headquarters.report(TASK, json!(CORRECT_SAMPLES)).await
}
