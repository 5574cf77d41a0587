// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了各个解题流程共享的数据结构，包括：
/// - 报告（report）：报告端点的请求与回复
/// - 对话（conversation）：xyz 验证端点的消息格式
/// - 校准文件（calibration）：带有加法题与开放问题的测试数据
/// - 文档（document）：写入向量库的报告与人物资料
/// - 分类（classification）：people / hardware 文件分类
/// - 图（graph）：人物关系图的导入格式
pub mod calibration;
pub mod classification;
pub mod conversation;
pub mod document;
pub mod graph;
pub mod report;
