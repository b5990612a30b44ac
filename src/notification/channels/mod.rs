//! 具体渠道实现

pub mod ntfy;

pub use ntfy::{NtfyChannel, NtfyConfig};
