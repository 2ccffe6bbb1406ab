// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

/// 爬取任务
///
/// 在边界中等待处理的单个工作单元。任务在链接发现时创建，
/// 由控制器消费一次。URL在入队前已规范化且与基础域同域。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// 规范化后的目标URL
    pub url: Url,
    /// 发现时的爬取深度
    pub depth: u32,
}

impl CrawlTask {
    /// 创建新的爬取任务
    pub fn new(url: Url, depth: u32) -> Self {
        Self { url, depth }
    }
}
