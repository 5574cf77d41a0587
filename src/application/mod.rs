// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 每个路由对应 `use_cases` 中的一条线性流程：
/// 读取输入、调用模型或爬虫、整理答案、提交报告
pub mod context;
pub mod dto;
pub mod tools;
pub mod use_cases;
