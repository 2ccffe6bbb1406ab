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

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use crate::utils::url_utils;

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// 链接提取器
///
/// 负责从解析后的页面中提取同域绝对链接
pub struct LinkExtractor;

impl LinkExtractor {
    /// 从解析后的页面提取链接
    ///
    /// 将每个锚点的href针对页面URL解析为绝对URL，只保留与
    /// 基础域同域的http/https链接，并逐个规范化。返回的序列
    /// 保持文档内出现顺序，允许重复，去重由访问账本完成。
    ///
    /// # 参数
    ///
    /// * `page` - 解析后的HTML页面
    /// * `page_url` - 页面自身的URL，相对链接针对其解析
    /// * `base_url` - 爬取的基础URL，用于同域判断
    ///
    /// # 返回值
    ///
    /// 按出现顺序排列的规范化链接序列
    pub fn extract(page: &Html, page_url: &Url, base_url: &Url) -> Vec<Url> {
        let mut links = Vec::new();

        for element in page.select(&ANCHOR_SELECTOR) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            // Ignore fragment identifiers, mailto and javascript links
            if href.starts_with('#') || href.starts_with("mailto:") || href.starts_with("javascript:")
            {
                continue;
            }

            let Ok(resolved) = url_utils::resolve_url(page_url, href) else {
                continue;
            };

            // Only keep http/https links
            if resolved.scheme() != "http" && resolved.scheme() != "https" {
                continue;
            }

            if !url_utils::same_domain(&resolved, base_url) {
                continue;
            }

            links.push(url_utils::canonicalize(&resolved));
        }

        links
    }
}

#[cfg(test)]
#[path = "link_extractor_test.rs"]
mod tests;
