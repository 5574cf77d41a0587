// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含与具体技术的交互：
/// - 数据库（database）：sea-orm 连接池
/// - 指标（metrics）：Prometheus 导出器
/// - 仓库实现（repositories）：pgvector 文档仓库与 Neo4j 图仓库
/// - 存储（storage）：本地文件与内存存储
///
/// 基础设施层依赖于领域层的抽象接口，路由只通过这些接口访问外部系统。
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod storage;
