// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::application::dto::search_request::{SearchRequestDto, SearchResponseDto};
use crate::index::sink::{IndexError, IndexSink};

/// 默认返回结果数量
const DEFAULT_LIMIT: usize = 10;

/// 返回结果数量上限
const MAX_LIMIT: usize = 100;

/// 处理搜索请求
///
/// 空查询在到达索引前被拒绝。
///
/// # 参数
///
/// * `sink` - 索引接收器实例
/// * `params` - 搜索请求参数
///
/// # 返回值
///
/// 返回实现了 `IntoResponse` 的响应，包含结果列表或
/// 明确的无结果信息
pub async fn search(
    Extension(sink): Extension<Arc<dyn IndexSink>>,
    Query(params): Query<SearchRequestDto>,
) -> impl IntoResponse {
    let query = params.q.as_deref().unwrap_or("").trim().to_string();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "search query cannot be empty" })),
        )
            .into_response();
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    match sink.query(&query, limit).await {
        Ok(results) => {
            let message = if results.is_empty() {
                Some("no results".to_string())
            } else {
                None
            };
            (
                StatusCode::OK,
                Json(SearchResponseDto {
                    query,
                    results,
                    message,
                }),
            )
                .into_response()
        }
        Err(IndexError::QueryParsing(details)) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": details }))).into_response()
        }
        Err(e) => {
            tracing::error!(query = %query, error = %e, "search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
