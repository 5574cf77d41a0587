// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块封装了各个解题流程依赖的外部服务：
/// - 代理（agent）：工具注册表与工具调用循环
/// - 爬虫服务（crawl_service）：Firecrawl 页面抓取
/// - 总部服务（headquarters_service）：报告端点、数据文件与查询 API
/// - LLM服务（llm_service）：对话、转写、图片生成与嵌入
///
/// 每个服务都以 trait 暴露，路由通过 `SolverContext` 使用其实现，
/// 测试中可以替换为脚本化的实现。
pub mod agent;
pub mod crawl_service;
pub mod headquarters_service;
pub mod llm_service;
