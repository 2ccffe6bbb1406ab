// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::search_hit::SearchHit;

#[derive(Debug, Deserialize)]
pub struct SearchRequestDto {
    /// 自由文本查询
    pub q: Option<String>,
    /// 返回结果数量上限
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponseDto {
    pub query: String,
    pub results: Vec<SearchHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
