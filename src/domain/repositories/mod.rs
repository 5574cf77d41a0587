// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，具体实现由基础设施层提供：
/// - 文档仓库（document_repository）：Postgres + pgvector 中的报告与人物资料
/// - 图仓库（graph_repository）：人物关系图
/// - 存储仓库（storage_repository）：任务输入文件与中间结果
pub mod document_repository;
pub mod graph_repository;
pub mod storage_repository;
