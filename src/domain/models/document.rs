// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 文档
///
/// 由一个已抓取页面整形得到的可索引字段集合，
/// 通过索引接收器的upsert操作恰好消费一次。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// 页面URL（规范化形式，作为索引中的唯一键）
    pub url: String,
    /// 页面标题
    pub title: String,
    /// 结果列表摘要文本
    pub teaser: String,
    /// 可索引正文文本
    pub content: String,
}

impl Document {
    pub fn new(url: String, title: String, teaser: String, content: String) -> Self {
        Self {
            url,
            title,
            teaser,
            content,
        }
    }
}
