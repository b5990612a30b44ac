//! 运行配置 - 启动时从环境变量读取一次，之后只读
//!
//! | 变量             | 必填 | 默认值                                 |
//! |------------------|------|----------------------------------------|
//! | `GH_TOKEN`       | 是   |                                        |
//! | `NTFY_URL`       | 是   |                                        |
//! | `NTFY_TOKEN`     | 否   | 不发送 Authorization                   |
//! | `SYNC_INTERVAL`  | 否   | 300 秒                                 |
//! | `DB_PATH`        | 否   | `<data dir>/gh-ntfy/notifications.db`  |
//! | `GITHUB_API_URL` | 否   | `https://api.github.com`               |

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// GitHub REST API 地址
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// 默认轮询间隔（秒）
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 300;

/// 拉取通知超时
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// 推送超时
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// ntfy 通知图标
pub const GITHUB_ICON_URL: &str =
    "https://github.githubassets.com/images/modules/logos_page/GitHub-Mark.png";

/// 无法解析 subject URL 时的落地页
pub const FALLBACK_NOTIFICATIONS_URL: &str = "https://github.com/notifications";

/// 完整运行配置
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub personal access token
    pub github_token: String,
    /// GitHub API 根地址（测试时可指向 mock server）
    pub github_api_url: String,
    /// ntfy topic 完整 URL
    pub ntfy_url: String,
    /// ntfy access token
    pub ntfy_token: Option<String>,
    /// 轮询间隔
    pub sync_interval: Duration,
    /// 去重数据库路径
    pub db_path: PathBuf,
    pub fetch_timeout: Duration,
    pub delivery_timeout: Duration,
}

impl Config {
    /// 从进程环境变量加载
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意 key -> value 查找函数加载，空字符串视为未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let github_token = get("GH_TOKEN").ok_or(ConfigError::Missing("GH_TOKEN"))?;
        let ntfy_url = get("NTFY_URL").ok_or(ConfigError::Missing("NTFY_URL"))?;

        let sync_interval = match get("SYNC_INTERVAL") {
            Some(raw) => parse_interval("SYNC_INTERVAL", &raw)?,
            None => Duration::from_secs(DEFAULT_SYNC_INTERVAL_SECS),
        };

        let github_api_url = get("GITHUB_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        Ok(Self {
            github_token,
            github_api_url,
            ntfy_url,
            ntfy_token: get("NTFY_TOKEN"),
            sync_interval,
            db_path: get("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            fetch_timeout: FETCH_TIMEOUT,
            delivery_timeout: DELIVERY_TIMEOUT,
        })
    }

    /// 覆盖轮询间隔（CLI 参数优先于环境变量）
    pub fn with_interval_secs(mut self, secs: u64) -> Result<Self, ConfigError> {
        self.sync_interval = parse_interval("--interval", &secs.to_string())?;
        Ok(self)
    }

    /// 覆盖数据库路径
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }
}

/// 只解析数据库路径（`stats` 等不需要 token 的命令使用）
pub fn db_path_from_env() -> PathBuf {
    std::env::var("DB_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(default_db_path)
}

/// 默认数据库位置：平台数据目录下的 gh-ntfy/notifications.db
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gh-ntfy")
        .join("notifications.db")
}

fn parse_interval(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
        ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        }
    })?;

    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "interval must be at least 1 second".to_string(),
        });
    }

    Ok(Duration::from_secs(secs))
}
