// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").unwrap());

/// 最小布尔倒排索引
///
/// 从小写词元到包含该词元的URL有序去重序列的映射。
/// 作为外部全文索引的自包含替代，只支持布尔交集查询。
#[derive(Debug, Default)]
pub struct MemoryIndex {
    /// 倒排表
    postings: HashMap<String, Vec<String>>,
}

impl MemoryIndex {
    /// 创建空索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 将文档文本加入索引
    ///
    /// 文本按非单词字符边界切分并转为小写，每个词元的
    /// URL列表保持插入顺序且不重复
    pub fn add_document(&mut self, url: &str, text: &str) {
        let lowered = text.to_lowercase();
        for token in TOKEN_REGEX.find_iter(&lowered) {
            let urls = self.postings.entry(token.as_str().to_string()).or_default();
            if !urls.iter().any(|existing| existing == url) {
                urls.push(url.to_string());
            }
        }
    }

    /// 布尔交集查询
    ///
    /// 返回同时包含所有查询词的URL，顺序沿用第一个词的
    /// URL列表。任一词不在索引中时返回空结果。
    pub fn search(&self, terms: &[&str]) -> Vec<String> {
        let mut term_iter = terms.iter().map(|term| term.to_lowercase());

        let Some(first) = term_iter.next() else {
            return Vec::new();
        };
        let Some(mut result) = self.postings.get(&first).cloned() else {
            return Vec::new();
        };

        for term in term_iter {
            let Some(urls) = self.postings.get(&term) else {
                return Vec::new();
            };
            result.retain(|url| urls.contains(url));
        }

        result
    }

    /// 索引中的词元数量
    pub fn token_count(&self) -> usize {
        self.postings.len()
    }
}
