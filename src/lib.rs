//! gh-ntfy - 轮询 GitHub 未读通知，去重后转发到 ntfy

pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod notification;
pub mod poller;
pub mod scheduler;

pub use config::Config;
pub use error::{ConfigError, CycleError, DeliveryError, SourceError, StoreError};
pub use github::{resolve_html_url, GitHubClient, GitHubNotification, NotificationSource};
pub use notification::{
    classify, NtfyChannel, Presentation, Priority, PushChannel, PushMessage, SeenStore, SendResult,
    SqliteSeenStore,
};
pub use poller::{CycleReport, SourcePoller};
pub use scheduler::Scheduler;
