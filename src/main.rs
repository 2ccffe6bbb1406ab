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

use anyhow::Context;
use sitesearch::config::settings::Settings;
use sitesearch::crawler::controller::{CrawlController, CrawlOptions};
use sitesearch::engines::reqwest_engine::ReqwestEngine;
use sitesearch::index::sink::IndexSink;
use sitesearch::index::tantivy_sink::TantivySink;
use sitesearch::presentation::routes;
use sitesearch::utils::robots::RobotsGate;
use sitesearch::utils::telemetry;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use url::Url;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件、执行种子爬取并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting sitesearch...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Open the index once for the whole process lifetime
    let sink: Arc<dyn IndexSink> = Arc::new(
        TantivySink::open(Path::new(&settings.index.dir))
            .with_context(|| format!("Failed to open index at {}", settings.index.dir))?,
    );
    info!(dir = %settings.index.dir, "Index opened");

    // 4. Run the seed crawl when configured
    if let Some(seed) = &settings.crawl.seed_url {
        let seed_url =
            Url::parse(seed).with_context(|| format!("Invalid seed URL: {}", seed))?;
        let timeout = Duration::from_secs(settings.crawl.request_timeout_secs);

        let engine = ReqwestEngine::new(&settings.crawl.user_agent)?;
        let gate = RobotsGate::warm_up(&seed_url, &settings.crawl.user_agent, timeout).await;
        let options = CrawlOptions {
            max_depth: settings.crawl.max_depth,
            max_pages: settings.crawl.max_pages,
            strategy: settings.crawl.strategy,
            request_timeout: timeout,
        };

        info!(seed = %seed_url, "Starting seed crawl");
        let controller = CrawlController::new(engine, gate, sink.clone(), seed_url, options);
        let report = controller.run().await;
        info!(
            pages_indexed = report.pages_indexed,
            pages_failed = report.pages_failed,
            tasks_dropped = report.tasks_dropped,
            "Seed crawl finished"
        );
    }

    // 5. Start HTTP server
    let app = routes::routes(sink.clone());
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 6. Flush the index before exit
    sink.flush().await?;
    info!("Index flushed, shutting down");

    Ok(())
}

/// 等待终止信号
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
