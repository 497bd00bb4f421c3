// src/config/mod.rs
pub mod settings;

pub use settings::{Config, DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_PAGE_SIZE};

use crate::error::ClientError;
use std::sync::Arc;

/// Loads and returns the client configuration as an `Arc<Config>`.
/// Centralizes `.env` loading and validation of the critical settings.
pub fn load_config() -> Result<Arc<Config>, ClientError> {
    dotenv::dotenv().ok(); // Load .env file if present, ignore errors

    let config = Config::from_env();

    if config.api_base_url.is_empty() {
        return Err(ClientError::Config(
            "REELCV_API_BASE_URL cannot be empty".to_string(),
        ));
    }
    if config.page_size == 0 {
        return Err(ClientError::Config(
            "REELCV_PAGE_SIZE must be at least 1".to_string(),
        ));
    }

    config.validate_and_log();

    Ok(Arc::new(config))
}
