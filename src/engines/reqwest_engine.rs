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

use crate::engines::traits::{FetchEngine, FetchError, FetchRequest, FetchResponse};
use async_trait::async_trait;
use reqwest::Client;

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎
pub struct ReqwestEngine {
    /// HTTP客户端
    client: Client,
}

impl ReqwestEngine {
    /// 创建新的抓取引擎实例
    ///
    /// # 参数
    ///
    /// * `user_agent` - 所有请求使用的User-Agent
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 抓取引擎实例
    /// * `Err(FetchError)` - 客户端构建失败
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(user_agent.to_string()).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FetchEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 抓取响应
    /// * `Err(FetchError)` - 抓取过程中出现的错误
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(request.url.clone())
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::RequestFailed(e)
                }
            })?;

        let status_code = response.status().as_u16();
        if !response.status().is_success() {
            return Err(FetchError::BadStatus(status_code));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        // Ensure content_type is not empty
        let content_type = if content_type.trim().is_empty() {
            "text/html".to_string()
        } else {
            content_type
        };

        if !content_type.to_lowercase().contains("text/html") {
            return Err(FetchError::NotHtml(content_type));
        }

        let content = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::RequestFailed(e)
            }
        })?;

        Ok(FetchResponse {
            status_code,
            content,
            content_type,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
