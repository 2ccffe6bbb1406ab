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

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 非成功状态码
    #[error("Unexpected status code: {0}")]
    BadStatus(u16),
    /// 非HTML内容
    #[error("Unsupported content type: {0}")]
    NotHtml(String),
}

/// 抓取请求
pub struct FetchRequest {
    /// 目标URL
    pub url: Url,
    /// 超时时间
    pub timeout: Duration,
}

/// 抓取响应
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub content: String,
    /// 内容类型
    pub content_type: String,
}

/// 抓取引擎特质
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// 执行抓取
    ///
    /// 传输失败、超时、非2xx状态码和非HTML内容均视为抓取失败
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
