//! GitHub notifications API - 拉取未读通知并转换为网页链接

pub mod client;
pub mod types;
pub mod url;

pub use client::{GitHubClient, NotificationSource};
pub use types::{GitHubNotification, Repository, Subject};
pub use url::resolve_html_url;
