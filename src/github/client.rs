//! GitHub 通知 API 客户端
//!
//! 只读：`GET /notifications?all=false`，从不标记已读。

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::types::GitHubNotification;
use crate::config::Config;
use crate::error::SourceError;

const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// 未读通知来源
#[async_trait]
pub trait NotificationSource: Send + Sync {
    /// 拉取当前所有未读通知（单页）
    async fn fetch_unread(&self) -> Result<Vec<GitHubNotification>, SourceError>;
}

/// GitHub REST API 客户端
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    /// 创建客户端
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// 从运行配置创建
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Self::new(&config.github_api_url, &config.github_token, config.fetch_timeout)
    }

    fn notifications_url(&self) -> String {
        format!("{}/notifications", self.api_url)
    }
}

#[async_trait]
impl NotificationSource for GitHubClient {
    async fn fetch_unread(&self) -> Result<Vec<GitHubNotification>, SourceError> {
        let start = std::time::Instant::now();
        let response = self
            .client
            .get(self.notifications_url())
            .query(&[("all", "false")])
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", ACCEPT_V3)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "GitHub notifications request completed"
        );

        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
