//! 通知处理 - 分类、格式化、去重存储与推送渠道
//!
//! # 流程
//! 1. `classifier`：subject 类型 + reason -> tags / priority / emoji
//! 2. `formatter`：生成标题、正文和 action 按钮
//! 3. `channels::ntfy`：一次 HTTP POST 推送
//! 4. `store`：记录已推送的线程版本，防止重复推送

pub mod channel;
pub mod channels;
pub mod classifier;
pub mod formatter;
pub mod priority;
pub mod store;

pub use channel::{PushChannel, PushMessage, SendResult, ViewAction};
pub use channels::{NtfyChannel, NtfyConfig};
pub use classifier::{classify, Presentation};
pub use formatter::build_push_message;
pub use priority::Priority;
pub use store::{SeenEntry, SeenStore, SqliteSeenStore};
