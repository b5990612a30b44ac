//! gh-ntfy CLI
//!
//! 轮询 GitHub 未读通知并转发到 ntfy

use anyhow::Result;
use clap::{Parser, Subcommand};
use gh_ntfy::cli::{handle_check, handle_run, handle_stats, RunArgs, StatsArgs};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "gh-ntfy")]
#[command(about = "gh-ntfy - 将 GitHub 未读通知转发到 ntfy")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 启动轮询循环（默认命令）
    Run(RunArgs),
    /// 查看去重数据库
    Stats(StatsArgs),
    /// 校验环境配置
    Check,
}

/// 等待 Ctrl-C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=gh_ntfy=debug gh-ntfy run
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gh_ntfy=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => handle_run(args, shutdown_signal()).await?,
        Commands::Stats(args) => handle_stats(args)?,
        Commands::Check => handle_check()?,
    }

    Ok(())
}
