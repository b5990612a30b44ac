// src/cli/run.rs
//! Run 命令 - 启动轮询循环
//!
//! 配置来自环境变量，`--interval` / `--db-path` 覆盖对应变量。

use anyhow::{Context, Result};
use clap::Args;
use std::future::Future;
use std::path::PathBuf;
use tracing::{error, info};

use crate::config::Config;
use crate::github::GitHubClient;
use crate::notification::channels::{NtfyChannel, NtfyConfig};
use crate::notification::store::SqliteSeenStore;
use crate::poller::SourcePoller;
use crate::scheduler::Scheduler;

/// Run 命令参数
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// 只执行一轮后退出
    #[arg(long)]
    pub once: bool,

    /// 只打印将要推送的通知，不发送也不记录
    #[arg(long)]
    pub dry_run: bool,

    /// 轮询间隔（秒），覆盖 SYNC_INTERVAL
    #[arg(long, short)]
    pub interval: Option<u64>,

    /// 去重数据库路径，覆盖 DB_PATH
    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

/// 按命令行参数加载最终配置
pub fn load_config(args: &RunArgs) -> Result<Config> {
    let mut config = Config::from_env().map_err(|e| {
        error!(error = %e, "ENVIRONMENT ERROR: configuration is incomplete");
        e
    })?;

    if let Some(secs) = args.interval {
        config = config.with_interval_secs(secs)?;
    }
    if let Some(path) = &args.db_path {
        config = config.with_db_path(path);
    }

    Ok(config)
}

/// 处理 run 命令
pub async fn handle_run<F>(args: RunArgs, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let config = load_config(&args)?;

    // 启动阶段的错误都是致命的
    let store = SqliteSeenStore::open(&config.db_path)
        .with_context(|| format!("cannot open seen-notification store at {}", config.db_path.display()))?;
    let source = GitHubClient::from_config(&config).context("cannot create GitHub client")?;
    let channel = NtfyChannel::new(NtfyConfig {
        dry_run: args.dry_run,
        ..NtfyConfig::from_config(&config)
    })
    .context("cannot create ntfy client")?;

    let mut scheduler = Scheduler::new(SourcePoller::new(source, channel, store), config.sync_interval);

    if args.once {
        info!(dry_run = args.dry_run, "Running a single sync cycle");
        scheduler.run_once().await;
        return Ok(());
    }

    info!(
        interval_secs = config.sync_interval.as_secs(),
        db_path = %config.db_path.display(),
        dry_run = args.dry_run,
        "GitHub notification bridge active"
    );
    scheduler.run_until(shutdown).await;

    Ok(())
}
