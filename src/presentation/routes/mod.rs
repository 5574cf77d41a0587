// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::context::SolverContext;
use crate::presentation::handlers::{index_handler, solver_handler, webhook_handler};
use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 返回值
///
/// 返回挂载了上下文和请求追踪的路由
pub fn routes(ctx: Arc<SolverContext>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version));

    let solver_routes = Router::new()
        .route("/api/poligon", get(solver_handler::poligon))
        .route("/api/1", get(solver_handler::login_form))
        .route("/api/2", get(solver_handler::conversation))
        .route("/api/3", get(solver_handler::calibration))
        .route("/api/5", get(solver_handler::censorship))
        .route("/api/6", get(solver_handler::interrogation))
        .route("/api/7", get(solver_handler::robot_image))
        .route("/api/8", get(solver_handler::categorize))
        .route("/api/9", get(solver_handler::arxiv_notes))
        .route("/api/301", get(solver_handler::keywords))
        .route("/api/302", get(solver_handler::vector_search))
        .route("/api/302/index", post(index_handler::index_reports))
        .route("/api/303", get(solver_handler::datacenters))
        .route("/api/304", get(solver_handler::explore_database))
        .route("/api/305", get(solver_handler::connections))
        .route("/api/305/snapshot", post(index_handler::snapshot_users))
        .route("/api/305/import", post(index_handler::import_graph))
        .route("/api/401", get(solver_handler::photos))
        .route("/api/402", get(solver_handler::research))
        .route(
            "/api/403",
            get(webhook_handler::register_drone_webhook)
                .post(webhook_handler::describe_drone_position),
        )
        .route("/api/405", post(webhook_handler::answer_notes))
        .route("/api/501", get(solver_handler::phone))
        .route("/api/501/index", post(index_handler::index_people))
        .route("/api/502", get(solver_handler::gps))
        .route("/api/503", get(solver_handler::phone_conversations))
        .layer(Extension(ctx));

    Router::new()
        .merge(public_routes)
        .merge(solver_routes)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
