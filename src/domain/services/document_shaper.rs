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
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::models::document::Document;
use crate::utils::url_utils;

/// 无标题页面的标题占位值
pub const UNTITLED: &str = "Untitled";

/// 摘要最大字符数
pub const TEASER_MAX_CHARS: usize = 200;

/// 摘要截断标记
pub const TEASER_TRUNCATION_MARKER: &str = "...";

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static META_DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p, div").unwrap());
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// 文档整形器
///
/// 从解析后的页面派生标题、摘要和可索引正文。
/// 三个字段相互独立计算且从不失败，缺失的来源元素
/// 一律落到文档化的回退值。
pub struct DocumentShaper;

impl DocumentShaper {
    /// 将解析后的页面整形为可索引文档
    ///
    /// # 参数
    ///
    /// * `page` - 解析后的HTML页面
    /// * `url` - 页面URL
    ///
    /// # 返回值
    ///
    /// 返回整形后的文档，URL字段为规范化形式
    pub fn shape(page: &Html, url: &Url) -> Document {
        Document::new(
            url_utils::canonical_key(url),
            Self::title(page),
            Self::teaser(page),
            Self::content(page),
        )
    }

    /// 提取页面标题
    ///
    /// 取第一个title元素的文本，缺失或为空时返回占位值
    fn title(page: &Html) -> String {
        page.select(&TITLE_SELECTOR)
            .next()
            .map(|element| collapse_whitespace(&element.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// 提取页面摘要
    ///
    /// 优先使用meta描述，缺失时取可见文本前缀，
    /// 超出上限时附加截断标记
    fn teaser(page: &Html) -> String {
        let description = page
            .select(&META_DESCRIPTION_SELECTOR)
            .next()
            .and_then(|element| element.value().attr("content"))
            .map(str::trim)
            .filter(|content| !content.is_empty());

        match description {
            Some(content) => content.to_string(),
            None => truncate_chars(&Self::visible_text(page), TEASER_MAX_CHARS),
        }
    }

    /// 提取可索引正文
    ///
    /// 拼接块级内容元素的可见文本，没有块级文本时
    /// 回退到整个页面的可见文本
    fn content(page: &Html) -> String {
        let mut parts: Vec<String> = Vec::new();
        for element in page.select(&BLOCK_SELECTOR) {
            // Nested blocks are already covered by their outermost ancestor
            let nested = element
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|ancestor| matches!(ancestor.value().name(), "p" | "div"));
            if nested {
                continue;
            }

            let mut raw = String::new();
            collect_visible_text(element, &mut raw);
            let text = collapse_whitespace(&raw);
            if !text.is_empty() {
                parts.push(text);
            }
        }

        if parts.is_empty() {
            Self::visible_text(page)
        } else {
            parts.join(" ")
        }
    }

    /// 提取页面的全部可见文本
    fn visible_text(page: &Html) -> String {
        let root = page
            .select(&BODY_SELECTOR)
            .next()
            .unwrap_or_else(|| page.root_element());
        let mut raw = String::new();
        collect_visible_text(root, &mut raw);
        collapse_whitespace(&raw)
    }
}

/// 递归收集元素的可见文本，跳过脚本和样式内容
fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if matches!(
                child_element.value().name(),
                "script" | "style" | "noscript" | "template"
            ) {
                continue;
            }
            collect_visible_text(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            out.push(' ');
            out.push_str(text);
        }
    }
}

/// 规范化空白字符
fn collapse_whitespace(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    buf.trim_end().to_string()
}

/// 按字符数截断文本，截断时附加标记
fn truncate_chars(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let prefix: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}{}", prefix, TEASER_TRUNCATION_MARKER)
    } else {
        prefix
    }
}

#[cfg(test)]
#[path = "document_shaper_test.rs"]
mod tests;
