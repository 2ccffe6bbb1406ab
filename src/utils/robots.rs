// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use robotstxt::DefaultMatcher;
use std::time::Duration;
use url::Url;

/// Robots.txt检查器接口
pub trait RobotsGateTrait: Send + Sync {
    /// 检查URL是否被允许访问
    fn is_allowed(&self, url: &Url) -> bool;
}

/// Robots.txt检查器
///
/// 在爬取开始前对基础域执行一次robots.txt预热抓取，
/// 规则集在整个运行期间不可变，之后的检查均基于缓存内容。
pub struct RobotsGate {
    /// 缓存的robots.txt内容
    rules: String,

    /// User-Agent
    user_agent: String,
}

impl RobotsGate {
    /// 基于已有规则内容创建检查器
    pub fn from_rules(rules: impl Into<String>, user_agent: &str) -> Self {
        Self {
            rules: rules.into(),
            user_agent: user_agent.to_string(),
        }
    }

    /// 预热：抓取基础域的robots.txt并缓存
    ///
    /// 资源不可达或返回非成功状态时按空规则处理，即默认允许。
    ///
    /// # 参数
    ///
    /// * `base_url` - 爬取的基础URL，robots.txt从其域根部获取
    /// * `user_agent` - 用于匹配规则的User-Agent
    /// * `timeout` - 抓取超时时间
    ///
    /// # 返回值
    ///
    /// 返回新的Robots检查器实例
    pub async fn warm_up(base_url: &Url, user_agent: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::new();
        let rules = match base_url.join("/robots.txt") {
            Ok(robots_url) => {
                let response = client
                    .get(robots_url.clone())
                    .header("User-Agent", user_agent)
                    .timeout(timeout)
                    .send()
                    .await;

                match response {
                    Ok(resp) if resp.status().is_success() => resp.text().await.unwrap_or_default(),
                    Ok(resp) => {
                        // 404 is a valid response, meaning no robots.txt
                        tracing::debug!(
                            url = %robots_url,
                            status = resp.status().as_u16(),
                            "robots.txt not available, allowing all"
                        );
                        String::new()
                    }
                    Err(e) => {
                        tracing::warn!(
                            url = %robots_url,
                            error = %e,
                            "failed to fetch robots.txt, allowing all"
                        );
                        String::new()
                    }
                }
            }
            Err(_) => String::new(),
        };

        Self::from_rules(rules, user_agent)
    }
}

impl RobotsGateTrait for RobotsGate {
    fn is_allowed(&self, url: &Url) -> bool {
        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.rules, &self.user_agent, url.as_str())
    }
}
