// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::context::SolverContext;
use crate::utils::errors::SolverResult;

pub const NOTES_FILE: &str = "9/notes.md";

/// 返回整理好的论文笔记
pub async fn execute(ctx: &SolverContext) -> SolverResult<String> {
    ctx.read_text(NOTES_FILE).await
}
