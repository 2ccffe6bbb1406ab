// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::index::sink::IndexSink;
use crate::presentation::handlers::{ingest_handler, search_handler};

/// 创建应用路由
///
/// # 参数
///
/// * `sink` - 启动时构建一次的索引接收器，注入摄入和查询路径
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(sink: Arc<dyn IndexSink>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/v1/index", post(ingest_handler::ingest))
        .route("/v1/search", get(search_handler::search))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(sink))
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
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
