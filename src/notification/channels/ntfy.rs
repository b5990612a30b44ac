//! ntfy 渠道 - 每条通知一次 HTTP POST
//!
//! 正文为 UTF-8 文本，元数据全部放在 header 中：
//! `Title` / `Tags` / `Priority` / `Click` / `Icon` / `Actions`

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::DeliveryError;
use crate::notification::channel::{PushChannel, PushMessage, SendResult};

/// ntfy 渠道配置
#[derive(Debug, Clone)]
pub struct NtfyConfig {
    /// topic 完整 URL（如 https://ntfy.sh/my-topic）
    pub url: String,
    /// access token，为空时不发送 Authorization
    pub token: Option<String>,
    /// 请求超时
    pub timeout: Duration,
    /// 只打印不发送
    pub dry_run: bool,
}

impl NtfyConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            url: config.ntfy_url.clone(),
            token: config.ntfy_token.clone(),
            timeout: config.delivery_timeout,
            dry_run: false,
        }
    }
}

/// ntfy 推送渠道
#[derive(Debug)]
pub struct NtfyChannel {
    client: Client,
    config: NtfyConfig,
}

impl NtfyChannel {
    /// 创建渠道
    pub fn new(config: NtfyConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// 构造请求 header
    fn headers(&self, message: &PushMessage) -> Result<HeaderMap, DeliveryError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &self.config.token {
            headers.insert(AUTHORIZATION, header_value("Authorization", &format!("Bearer {}", token))?);
        }

        // Title 含 emoji，按原始 UTF-8 字节发送
        headers.insert("title", header_value("Title", &message.title)?);
        headers.insert("tags", header_value("Tags", &message.tags_header())?);
        headers.insert("priority", header_value("Priority", &message.priority.header_value())?);
        headers.insert("click", header_value("Click", &message.click)?);
        headers.insert("icon", header_value("Icon", &message.icon)?);

        let actions = message.actions_header().map_err(|e| DeliveryError::Header {
            name: "Actions",
            reason: e.to_string(),
        })?;
        headers.insert("actions", header_value("Actions", &actions)?);

        Ok(headers)
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, DeliveryError> {
    HeaderValue::from_bytes(value.as_bytes()).map_err(|e| DeliveryError::Header {
        name,
        reason: e.to_string(),
    })
}

#[async_trait]
impl PushChannel for NtfyChannel {
    fn name(&self) -> &str {
        "ntfy"
    }

    async fn send(&self, message: &PushMessage) -> Result<SendResult, DeliveryError> {
        let headers = self.headers(message)?;

        if self.config.dry_run {
            info!(
                channel = "ntfy",
                title = %message.title,
                priority = %message.priority,
                click = %message.click,
                "[DRY-RUN] Would push notification"
            );
            return Ok(SendResult::Skipped("dry-run".to_string()));
        }

        let response = self
            .client
            .post(&self.config.url)
            .headers(headers)
            .body(message.body.clone().into_bytes())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(channel = "ntfy", status = status.as_u16(), "Push accepted");
        Ok(SendResult::Sent)
    }
}
