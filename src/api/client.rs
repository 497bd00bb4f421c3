// src/api/client.rs
//! HTTP collaborator for the ReelCV backend.
//!
//! Thin, stateless wrapper over `reqwest`: builds endpoint URLs, attaches
//! the bearer token, and maps non-2xx responses into display-ready
//! `ClientError::Api` values. All timeout handling is delegated to the
//! underlying client's configured timeout.

use log::{debug, warn};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::models::{VideoPage, VideoScore};

use super::endpoints::EndpointKey;

const USER_AGENT: &str = concat!("reelcv-client/", env!("CARGO_PKG_VERSION"));

/// Shape of backend error bodies; `message` is optional because proxies and
/// gateways return bare statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

pub struct ApiClient {
    http: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let mut base = config.api_base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.http_timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_token: config.api_token.clone(),
        })
    }

    /// One page of a paginated list query:
    /// `GET {base}/{path}?page=<page>&size=<size>`.
    pub async fn fetch_page(&self, key: &EndpointKey, page: u32, size: u32) -> Result<VideoPage> {
        let mut url = self.base_url.join(&key.path())?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in key.query_params() {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("size", &size.to_string());
        }

        debug!("GET {} ({}, page {})", url, key, page);
        let response = self.request(Method::GET, url).await?;
        Ok(response.json::<VideoPage>().await?)
    }

    /// Aggregate like count / score for one video.
    pub async fn video_score(&self, video_id: &str) -> Result<VideoScore> {
        let url = self.base_url.join(&format!("videos/{}/score", video_id))?;
        let response = self.request(Method::GET, url).await?;
        Ok(response.json::<VideoScore>().await?)
    }

    pub async fn like(&self, user_id: &str, video_id: &str) -> Result<()> {
        let url = self
            .base_url
            .join(&format!("users/{}/likes/{}", user_id, video_id))?;
        self.request(Method::POST, url).await?;
        Ok(())
    }

    pub async fn unlike(&self, user_id: &str, video_id: &str) -> Result<()> {
        let url = self
            .base_url
            .join(&format!("users/{}/likes/{}", user_id, video_id))?;
        self.request(Method::DELETE, url).await?;
        Ok(())
    }

    async fn request(&self, method: Method, url: Url) -> Result<Response> {
        let mut builder = self.http.request(method, url.clone());
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await?;
        self.check_status(url, response).await
    }

    /// Map any non-2xx status into a uniform, display-ready failure.
    async fn check_status(&self, url: Url, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = extract_error_message(status, response).await;
        warn!("Request to {} failed: {} ({})", url, message, status);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

async fn extract_error_message(status: StatusCode, response: Response) -> String {
    if let Ok(body) = response.json::<ApiErrorBody>().await {
        if let Some(message) = body.message {
            if !message.trim().is_empty() {
                return message;
            }
        }
    }
    format!("Request failed with status {}", status.as_u16())
}
