// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use scraper::Html;
use serde_json::json;
use std::sync::Arc;
use url::Url;

use crate::application::dto::ingest_request::IngestRequestDto;
use crate::domain::services::document_shaper::DocumentShaper;
use crate::index::sink::IndexSink;

/// 处理文档摄入请求
///
/// 接受(url, html)对，整形后写入索引。
///
/// # 参数
///
/// * `sink` - 索引接收器实例
/// * `payload` - 摄入请求数据
///
/// # 返回值
///
/// 返回实现了 `IntoResponse` 的响应：
/// - 200 摄入成功
/// - 400 缺少字段或URL无效
/// - 500 索引写入失败
pub async fn ingest(
    Extension(sink): Extension<Arc<dyn IndexSink>>,
    Json(payload): Json<IngestRequestDto>,
) -> impl IntoResponse {
    if payload.url.trim().is_empty() || payload.html.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "url and html are required" })),
        )
            .into_response();
    }

    let url = match Url::parse(payload.url.trim()) {
        Ok(url) => url,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("invalid url: {}", e) })),
            )
                .into_response();
        }
    };

    // The parse tree is not Send; shape before the upsert await
    let document = {
        let page = Html::parse_document(&payload.html);
        DocumentShaper::shape(&page, &url)
    };

    match sink.upsert(&document).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "indexed", "url": document.url })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(url = %document.url, error = %e, "ingest failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("indexing failed: {}", e) })),
            )
                .into_response()
        }
    }
}
