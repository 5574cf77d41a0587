// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// xyz 验证端点交换的消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyMessage {
    #[serde(rename = "msgID")]
    pub msg_id: i64,
    pub text: String,
}

/// 开场消息，msgID 以字符串 "0" 发送
#[derive(Debug, Clone, Serialize)]
pub struct OpeningMessage {
    pub text: &'static str,
    #[serde(rename = "msgID")]
    pub msg_id: &'static str,
}

impl Default for OpeningMessage {
    fn default() -> Self {
        Self {
            text: "READY",
            msg_id: "0",
        }
    }
}
