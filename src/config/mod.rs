// region:    --- Imports
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

// endregion: --- Imports

// region:    --- Defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_SESSION_FILE: &str = ".onbid-session";
pub const DEFAULT_SYNC_POLL_SECS: u64 = 10;
pub const DEFAULT_NOTICE_SECS: u64 = 3;
pub const DEFAULT_LIVE_FETCH_ROWS: u32 = 1000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// endregion: --- Defaults

// region:    --- Client Config
/// 클라이언트 설정
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub sync_poll_interval: Duration,
    pub notice_duration: Duration,
    pub live_fetch_rows: u32,
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            sync_poll_interval: Duration::from_secs(DEFAULT_SYNC_POLL_SECS),
            notice_duration: Duration::from_secs(DEFAULT_NOTICE_SECS),
            live_fetch_rows: DEFAULT_LIVE_FETCH_ROWS,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// 환경 변수에서 설정 로드 (값이 없거나 잘못되면 기본값)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 조회 함수로부터 설정 구성
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("ONBID_API_BASE_URL")
            .map(|v| normalize_base_url(&v))
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base_url);

        let session_file = lookup("ONBID_SESSION_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        let sync_poll_interval = parse_positive(&lookup, "ONBID_SYNC_POLL_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.sync_poll_interval);

        let notice_duration = parse_positive(&lookup, "ONBID_NOTICE_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.notice_duration);

        let live_fetch_rows = parse_positive(&lookup, "ONBID_LIVE_FETCH_ROWS")
            .map(|v| v.min(u64::from(DEFAULT_LIVE_FETCH_ROWS)) as u32)
            .unwrap_or(defaults.live_fetch_rows);

        let http_timeout = parse_positive(&lookup, "ONBID_HTTP_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        Self {
            api_base_url,
            session_file,
            sync_poll_interval,
            notice_duration,
            live_fetch_rows,
            http_timeout,
        }
    }

    /// 기본 URL 재지정
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api_base_url = normalize_base_url(base_url);
        self
    }
}

/// 끝의 슬래시 제거
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_positive<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => {
            warn!("{:<12} --> 잘못된 설정 값 무시: {}={}", "Config", key, raw);
            None
        }
        Ok(v) => Some(v),
    }
}

// endregion: --- Client Config


// endregion: --- Tests
