// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 存储仓库特质
///
/// 任务输入文件（音频、图片、报告等）与各路由写回的中间结果都经由该接口访问，
/// 键为相对于存储根目录的路径，例如 `8/audio/2024-11-12_report-00-sektor_C4.mp3`
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 使用指定键保存数据到存储中
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// 根据键从存储中检索数据
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// 检查存储中是否存在指定键
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// 列出目录下的文件名（不含子目录），按名称排序；目录不存在时返回空列表
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}
