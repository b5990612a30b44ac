//! 已转发通知存储 - SQLite 持久化去重表
//!
//! 每个通知线程最多一行：`thread_id -> updated_at`。
//! 重复转发同一线程会覆盖旧版本，不会追加；记录从不删除。

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::StoreError;

const SCHEMA: &str =
    "CREATE TABLE IF NOT EXISTS seen_notifs (thread_id TEXT PRIMARY KEY, updated_at TEXT)";

/// 去重存储接口
pub trait SeenStore: Send {
    /// 该线程从未记录过，或记录的版本与 `updated_at` 不同
    fn is_new(&self, thread_id: &str, updated_at: &str) -> Result<bool, StoreError>;

    /// 插入或覆盖该线程的版本
    fn record(&mut self, thread_id: &str, updated_at: &str) -> Result<(), StoreError>;
}

/// 一条已转发记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeenEntry {
    pub thread_id: String,
    pub updated_at: String,
}

/// SQLite 实现
pub struct SqliteSeenStore {
    conn: Connection,
}

impl SqliteSeenStore {
    /// 打开（必要时创建）数据库文件及其父目录
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let store = Self::bootstrap(conn)?;
        info!(path = %path.display(), "Seen-notification store ready");
        Ok(store)
    }

    /// 内存数据库（测试 / dry-run 使用）
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// 已跟踪的线程数量
    pub fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM seen_notifs", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// 最近写入的记录（最新在前）
    ///
    /// `INSERT OR REPLACE` 会删除旧行再插入，所以 rowid 反映最近一次写入顺序。
    pub fn recent(&self, limit: usize) -> Result<Vec<SeenEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT thread_id, updated_at FROM seen_notifs ORDER BY rowid DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(SeenEntry {
                thread_id: row.get(0)?,
                updated_at: row.get(1)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// 查询某线程记录的版本
    pub fn version_of(&self, thread_id: &str) -> Result<Option<String>, StoreError> {
        let version = self
            .conn
            .query_row(
                "SELECT updated_at FROM seen_notifs WHERE thread_id = ?1",
                params![thread_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(version)
    }
}

impl SeenStore for SqliteSeenStore {
    fn is_new(&self, thread_id: &str, updated_at: &str) -> Result<bool, StoreError> {
        let seen = self
            .conn
            .query_row(
                "SELECT 1 FROM seen_notifs WHERE thread_id = ?1 AND updated_at = ?2",
                params![thread_id, updated_at],
                |_| Ok(()),
            )
            .optional()?;
        Ok(seen.is_none())
    }

    fn record(&mut self, thread_id: &str, updated_at: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO seen_notifs (thread_id, updated_at) VALUES (?1, ?2)",
            params![thread_id, updated_at],
        )?;
        Ok(())
    }
}
