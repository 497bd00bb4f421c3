use std::env;

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub page_size: u32,
    pub http_timeout_ms: u64,
    pub identity_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            api_base_url: env::var("REELCV_API_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080/api".to_string()),
            api_token: env::var("REELCV_API_TOKEN").ok(),
            page_size: env::var("REELCV_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PAGE_SIZE),
            http_timeout_ms: env::var("REELCV_HTTP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_MS),
            identity_path: env::var("REELCV_IDENTITY_PATH").ok(),
        }
    }

    /// Minimal config pointing at an arbitrary base URL. Used by tests and
    /// by embedders that configure programmatically instead of via env.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Config {
            api_base_url: api_base_url.into(),
            api_token: None,
            page_size: DEFAULT_PAGE_SIZE,
            http_timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
            identity_path: None,
        }
    }

    pub fn validate_and_log(&self) {
        log::info!(
            "Client configuration loaded: base_url={}, page_size={}, timeout={}ms, auth={}",
            self.api_base_url,
            self.page_size,
            self.http_timeout_ms,
            if self.api_token.is_some() { "token" } else { "none" }
        );
        if self.api_base_url.is_empty() {
            log::error!("REELCV_API_BASE_URL cannot be empty.");
        }
        if self.page_size == 0 {
            log::error!("REELCV_PAGE_SIZE must be at least 1.");
        }
    }
}
