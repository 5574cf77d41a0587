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

use solvrs::application::context::SolverContext;
use solvrs::config::settings::Settings;
use solvrs::infrastructure::database::connection;
use solvrs::infrastructure::metrics;
use solvrs::presentation::routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use migration::{Migrator, MigratorTrait};
use solvrs::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting solvrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Prometheus exporter
    metrics::init_metrics(&settings.metrics);

    // 4. Optional vector store
    let db = if settings.database.url.is_some() {
        let db = Arc::new(connection::create_pool(&settings.database).await?);
        info!("Database connection established");

        info!("Running database migrations...");
        Migrator::up(db.as_ref(), None).await?;
        info!("Database migrations applied");
        Some(db)
    } else {
        warn!("database.url not set, vector routes are disabled");
        None
    };

    if settings.centrala.api_key.is_empty() {
        warn!("centrala.api_key is empty, reports will be rejected");
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let ctx = Arc::new(SolverContext::from_settings(settings, db));
    let app = routes::routes(ctx);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
