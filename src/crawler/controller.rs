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

use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::crawler::frontier::{Frontier, TraversalStrategy};
use crate::crawler::ledger::CrawlLedger;
use crate::domain::models::crawl_task::CrawlTask;
use crate::domain::services::document_shaper::DocumentShaper;
use crate::domain::services::link_extractor::LinkExtractor;
use crate::engines::traits::{FetchEngine, FetchRequest};
use crate::index::sink::{IndexError, IndexSink};
use crate::utils::errors::PageError;
use crate::utils::robots::RobotsGateTrait;
use crate::utils::url_utils;

/// 爬取选项
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// 最大爬取深度
    pub max_depth: u32,
    /// 最大页面数量
    pub max_pages: usize,
    /// 遍历策略
    pub strategy: TraversalStrategy,
    /// 单次请求超时时间
    pub request_timeout: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_pages: 100,
            strategy: TraversalStrategy::default(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// 爬取报告
///
/// 一次完整爬取运行的结果摘要
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// 成功整形并写入索引的页面数
    pub pages_indexed: usize,
    /// 抓取或索引失败的页面数
    pub pages_failed: usize,
    /// 因预算、去重或robots规则被丢弃的任务数
    pub tasks_dropped: usize,
}

/// 单个页面的处理结果
struct PageOutcome {
    /// 索引写入结果，失败时页面仍计为已访问
    index_result: Result<(), IndexError>,
    /// 页面中发现的同域链接
    links: Vec<Url>,
}

/// 爬取控制器
///
/// 以显式边界驱动的迭代循环处理每个URL：
/// 出队 → 预算检查 → 规范化 → 去重检查 → robots检查 →
/// 抓取 → 解析 → 整形 → 索引 → 链接提取 → 子任务入队。
/// 任何单个URL的失败只丢弃该URL，从不重试也从不中止运行。
pub struct CrawlController<E, G> {
    /// 抓取引擎
    engine: E,
    /// Robots.txt检查器
    gate: G,
    /// 索引接收器
    sink: Arc<dyn IndexSink>,
    /// 爬取的基础URL
    base_url: Url,
    /// 爬取选项
    options: CrawlOptions,
    /// 访问账本
    ledger: CrawlLedger,
}

impl<E: FetchEngine, G: RobotsGateTrait> CrawlController<E, G> {
    /// 创建新的爬取控制器实例
    ///
    /// # 参数
    ///
    /// * `engine` - 抓取引擎
    /// * `gate` - Robots.txt检查器
    /// * `sink` - 索引接收器
    /// * `base_url` - 种子URL，同时限定爬取的域
    /// * `options` - 爬取选项
    pub fn new(
        engine: E,
        gate: G,
        sink: Arc<dyn IndexSink>,
        base_url: Url,
        options: CrawlOptions,
    ) -> Self {
        let ledger = CrawlLedger::new(options.max_pages);
        Self {
            engine,
            gate,
            sink,
            base_url,
            options,
            ledger,
        }
    }

    /// 执行爬取
    ///
    /// 循环直到边界为空或页面预算耗尽
    ///
    /// # 返回值
    ///
    /// 返回本次运行的结果摘要
    pub async fn run(&self) -> CrawlReport {
        let mut report = CrawlReport::default();
        let mut frontier = Frontier::new(self.options.strategy);
        frontier.push(CrawlTask::new(url_utils::canonicalize(&self.base_url), 0));

        while let Some(task) = frontier.pop() {
            if self.ledger.budget_exhausted() {
                break;
            }

            if task.depth > self.options.max_depth {
                debug!(url = %task.url, depth = task.depth, "depth budget exceeded, task dropped");
                report.tasks_dropped += 1;
                continue;
            }

            let canonical = url_utils::canonical_key(&task.url);
            if self.ledger.is_visited(&canonical) {
                debug!(url = %task.url, "already visited, task dropped");
                report.tasks_dropped += 1;
                continue;
            }

            match self.process_task(&task).await {
                Ok(outcome) => {
                    if !self.ledger.commit(canonical) {
                        continue;
                    }

                    match outcome.index_result {
                        Ok(()) => {
                            report.pages_indexed += 1;
                            info!(url = %task.url, depth = task.depth, "page indexed");
                        }
                        Err(err) => {
                            report.pages_failed += 1;
                            self.log_failure(&task, &PageError::Index(err));
                        }
                    }

                    for link in outcome.links {
                        frontier.push(CrawlTask::new(link, task.depth + 1));
                    }
                }
                Err(err) => {
                    match err {
                        PageError::Disallowed => report.tasks_dropped += 1,
                        _ => report.pages_failed += 1,
                    }
                    self.log_failure(&task, &err);
                }
            }
        }

        info!(
            pages_indexed = report.pages_indexed,
            pages_failed = report.pages_failed,
            tasks_dropped = report.tasks_dropped,
            "crawl finished"
        );
        report
    }

    /// 处理单个爬取任务
    async fn process_task(&self, task: &CrawlTask) -> Result<PageOutcome, PageError> {
        if !self.gate.is_allowed(&task.url) {
            return Err(PageError::Disallowed);
        }

        let request = FetchRequest {
            url: task.url.clone(),
            timeout: self.options.request_timeout,
        };
        let response = self.engine.fetch(&request).await?;

        // The parse tree is not Send; shape and extract before the next await
        let (document, links) = {
            let page = Html::parse_document(&response.content);
            (
                DocumentShaper::shape(&page, &task.url),
                LinkExtractor::extract(&page, &task.url, &self.base_url),
            )
        };

        let index_result = self.sink.upsert(&document).await;
        Ok(PageOutcome {
            index_result,
            links,
        })
    }

    /// 失败的统一记录点
    fn log_failure(&self, task: &CrawlTask, error: &PageError) {
        warn!(url = %task.url, depth = task.depth, error = %error, "page processing failed");
    }

    /// 已处理页面数量
    pub fn pages_processed(&self) -> usize {
        self.ledger.pages_processed()
    }

    /// 访问集合大小
    pub fn visited_count(&self) -> usize {
        self.ledger.visited_count()
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
