//! Check 命令 - 校验配置并打开数据库，不访问网络

use anyhow::{Context, Result};

use crate::config::Config;
use crate::notification::store::SqliteSeenStore;

/// 隐藏 token，只保留前 4 个字符
pub fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}

/// 处理 check 命令
pub fn handle_check() -> Result<()> {
    let config = Config::from_env()?;
    let store = SqliteSeenStore::open(&config.db_path)
        .with_context(|| format!("cannot open seen-notification store at {}", config.db_path.display()))?;

    println!("配置检查通过:");
    println!("  GitHub API:    {}", config.github_api_url);
    println!("  GitHub token:  {}", redact(&config.github_token));
    println!("  ntfy URL:      {}", config.ntfy_url);
    println!(
        "  ntfy token:    {}",
        config.ntfy_token.as_deref().map(redact).unwrap_or_else(|| "(none)".to_string())
    );
    println!("  轮询间隔:      {}s", config.sync_interval.as_secs());
    println!("  数据库:        {} ({} 条记录)", config.db_path.display(), store.count()?);

    Ok(())
}
