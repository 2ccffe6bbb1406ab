// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::engines::traits::FetchError;
use crate::index::sink::IndexError;

/// 页面级错误类型
///
/// 单个URL处理失败的分类。每种失败只影响该URL本身，
/// 不重试也不中止整个爬取过程。
#[derive(Error, Debug)]
pub enum PageError {
    /// 抓取失败（网络错误、非成功状态码、非HTML内容）
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// 被robots.txt规则禁止
    #[error("Disallowed by robots.txt")]
    Disallowed,

    /// 索引写入失败
    #[error("Index upsert failed: {0}")]
    Index(#[from] IndexError),
}
