//! Server configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration, read from the environment with local-dev
/// defaults. All file paths live under `data_dir` unless overridden.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub directory_path: PathBuf,
    pub audit_db_path: PathBuf,
    pub sent_mail_path: PathBuf,
    /// Accepted admin API keys.
    pub api_keys: Vec<String>,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
    pub otp_ttl: Duration,
    /// Spreadsheet to poll for changes; watching is off when unset.
    pub watch_path: Option<PathBuf>,
    pub watch_interval: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(env_or("PROVISIO_DATA_DIR", "./data"));
        let directory_path = std::env::var("PROVISIO_DIRECTORY_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("directory.json"));
        let audit_db_path = std::env::var("PROVISIO_AUDIT_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("audit.db"));
        let sent_mail_path = std::env::var("PROVISIO_SENT_MAIL_LOG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("sent_emails.txt"));

        let api_keys = env_or("PROVISIO_API_KEYS", "dev-local-key")
            .split(',')
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            bind_addr: env_or("PROVISIO_BIND", "127.0.0.1:8080"),
            data_dir,
            directory_path,
            audit_db_path,
            sent_mail_path,
            api_keys,
            rate_limit_max_requests: env_parse_or("PROVISIO_RATE_LIMIT_MAX", 60),
            rate_limit_window: Duration::from_secs(env_parse_or(
                "PROVISIO_RATE_LIMIT_WINDOW_SECS",
                60,
            )),
            otp_ttl: Duration::from_secs(env_parse_or("PROVISIO_OTP_TTL_SECS", 300)),
            watch_path: std::env::var("PROVISIO_WATCH_FILE").ok().map(PathBuf::from),
            watch_interval: Duration::from_secs(env_parse_or("PROVISIO_WATCH_INTERVAL_SECS", 5)),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
