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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::crawler::frontier::TraversalStrategy;

/// 应用程序配置设置
///
/// 包含爬取、索引和服务器等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 爬取配置
    pub crawl: CrawlSettings,
    /// 索引配置
    pub index: IndexSettings,
    /// 服务器配置
    pub server: ServerSettings,
}

/// 爬取配置设置
#[derive(Debug, Deserialize)]
pub struct CrawlSettings {
    /// 种子URL，未设置时跳过启动爬取
    pub seed_url: Option<String>,
    /// 最大爬取深度
    pub max_depth: u32,
    /// 最大页面数量
    pub max_pages: usize,
    /// 遍历策略 (depth-first, breadth-first)
    pub strategy: TraversalStrategy,
    /// 单次请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// User-Agent请求头
    pub user_agent: String,
}

/// 索引配置设置
#[derive(Debug, Deserialize)]
pub struct IndexSettings {
    /// 索引存储目录
    pub dir: String,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default crawl settings
            .set_default("crawl.max_depth", 5)?
            .set_default("crawl.max_pages", 100)?
            .set_default("crawl.strategy", "depth-first")?
            .set_default("crawl.request_timeout_secs", 10)?
            .set_default("crawl.user_agent", "sitesearch-bot/0.1")?
            // Default index settings
            .set_default("index.dir", "./index")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SITESEARCH").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
