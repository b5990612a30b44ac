//! 推送渠道 trait 定义

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::priority::Priority;
use crate::error::DeliveryError;

/// ntfy action button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewAction {
    pub action: String,
    pub label: String,
    pub url: String,
}

impl ViewAction {
    /// "Open on GitHub" 按钮
    pub fn open_on_github(url: impl Into<String>) -> Self {
        Self {
            action: "view".to_string(),
            label: "Open on GitHub".to_string(),
            url: url.into(),
        }
    }
}

/// 已格式化的推送消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    /// 标题行（含 emoji）
    pub title: String,
    /// 消息正文
    pub body: String,
    pub tags: Vec<String>,
    pub priority: Priority,
    /// 点击通知时打开的链接
    pub click: String,
    pub icon: String,
    pub actions: Vec<ViewAction>,
}

impl PushMessage {
    /// `Tags` header
    pub fn tags_header(&self) -> String {
        self.tags.join(",")
    }

    /// `Actions` header（JSON 数组）
    pub fn actions_header(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.actions)
    }
}

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 未发送（dry-run 等）
    Skipped(String),
}

/// 推送渠道
#[async_trait]
pub trait PushChannel: Send + Sync {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 发送一条消息，一次网络请求
    async fn send(&self, message: &PushMessage) -> Result<SendResult, DeliveryError>;
}
