// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 无人机飞行指令
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct DroneInstruction {
    /// 自然语言描述的飞行路线
    #[validate(length(min = 1, message = "instruction cannot be empty"))]
    pub instruction: String,
}

/// 无人机最终位置的描述，原样返回给调用方
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DroneReply {
    pub description: String,
}
