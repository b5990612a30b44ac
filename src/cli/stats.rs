//! Stats 命令 - 查看去重数据库内容

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::db_path_from_env;
use crate::notification::store::{SeenEntry, SqliteSeenStore};

/// Stats 命令参数
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// 去重数据库路径，默认读取 DB_PATH
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// 显示最近 N 条记录
    #[arg(long, short, default_value = "10")]
    pub limit: usize,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// Stats 命令输出
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub db_path: String,
    pub tracked_threads: u64,
    pub recent: Vec<SeenEntry>,
}

/// 收集统计信息
///
/// 只读命令：数据库不存在时报错，不会新建空库。
pub fn collect_stats(db_path: PathBuf, limit: usize) -> Result<StatsOutput> {
    if !db_path.exists() {
        bail!("seen-notification store not found at {}", db_path.display());
    }

    let store = SqliteSeenStore::open(&db_path)
        .with_context(|| format!("cannot open seen-notification store at {}", db_path.display()))?;

    Ok(StatsOutput {
        db_path: db_path.display().to_string(),
        tracked_threads: store.count()?,
        recent: store.recent(limit)?,
    })
}

/// 处理 stats 命令
pub fn handle_stats(args: StatsArgs) -> Result<()> {
    let db_path = args.db_path.unwrap_or_else(db_path_from_env);
    let stats = collect_stats(db_path, args.limit)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("数据库: {}", stats.db_path);
    println!("已跟踪 {} 个通知线程\n", stats.tracked_threads);
    for entry in &stats.recent {
        println!("  {} | {}", entry.thread_id, entry.updated_at);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::store::SeenStore;

    #[test]
    fn test_collect_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seen.db");
        {
            let mut store = SqliteSeenStore::open(&path).unwrap();
            store.record("1", "a").unwrap();
            store.record("2", "b").unwrap();
        }

        let stats = collect_stats(path, 1).unwrap();
        assert_eq!(stats.tracked_threads, 2);
        assert_eq!(stats.recent.len(), 1);
        assert_eq!(stats.recent[0].thread_id, "2");
    }

    #[test]
    fn test_collect_stats_missing_db_does_not_create_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typo").join("seen.db");

        let err = collect_stats(path.clone(), 10).unwrap_err();

        assert!(err.to_string().contains("not found"));
        assert!(!path.exists());
        assert!(!dir.path().join("typo").exists());
    }
}
