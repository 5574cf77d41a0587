// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::debug;

use crate::config::settings::DatabaseSettings;
use crate::utils::errors::{SolverError, SolverResult};

/// 连接的最长存活时间，超过后由连接池回收
const MAX_LIFETIME: Duration = Duration::from_secs(3600);

/// 由数据库配置生成连接参数
///
/// 未设置 `database.url` 时返回 `NotConfigured`，向量检索相关路由因此不可用
pub fn connect_options(settings: &DatabaseSettings) -> SolverResult<ConnectOptions> {
    let url = settings
        .url
        .as_deref()
        .filter(|url| !url.is_empty())
        .ok_or(SolverError::NotConfigured("database.url"))?;

    let mut options = ConnectOptions::new(url.to_owned());
    if let Some(max) = settings.max_connections {
        options.max_connections(max);
    }
    if let Some(min) = settings.min_connections {
        options.min_connections(min);
    }
    if let Some(timeout) = settings.connect_timeout.map(Duration::from_secs) {
        options.connect_timeout(timeout).acquire_timeout(timeout);
    }
    if let Some(idle) = settings.idle_timeout.map(Duration::from_secs) {
        options.idle_timeout(idle);
    }
    // Statement logging would print whole embedding vectors
    options.max_lifetime(MAX_LIFETIME).sqlx_logging(false);

    Ok(options)
}

/// 创建向量库连接池
pub async fn create_pool(settings: &DatabaseSettings) -> SolverResult<DatabaseConnection> {
    let options = connect_options(settings)?;
    debug!(
        max_connections = ?options.get_max_connections(),
        "connecting to vector store"
    );
    Ok(Database::connect(options).await?)
}
