// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含各个解题流程共享的部分，包括：
/// - 领域模型（models）：报告、对话、文档等数据结构
/// - 仓库接口（repositories）：文件、向量库与图数据库的抽象接口
/// - 服务（services）：LLM、总部、爬虫与代理循环
pub mod models;
pub mod repositories;
pub mod services;
