// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// - 向量文档仓库（document_repo_impl）：Postgres + pgvector
/// - 图仓库（neo4j_graph_repo）：Neo4j HTTP 事务端点
pub mod document_repo_impl;
pub mod neo4j_graph_repo;
