//! Station API client (fetcher).
//!
//! One GET per poll cycle against the configured URL template. Every failure
//! (network, timeout, non-2xx, undecodable body) comes back as a
//! `TempestError`; the poller logs it and waits for the next tick. There is no
//! retry here.

use std::time::Duration;

use async_trait::async_trait;

use tempest_core::error::{Result, TempestError};
use tempest_core::RawObservation;

use crate::config::TempestConfig;

const USER_AGENT: &str = concat!("tempest-gateway/", env!("CARGO_PKG_VERSION"));

/// Anything that can produce one raw observation per call.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    async fn fetch(&self) -> Result<RawObservation>;
}

/// Substitute `{api_key}` and `{station_id}` into the template.
pub fn build_url(template: &str, api_key: &str, station_id: &str) -> String {
    template
        .replace("{api_key}", api_key)
        .replace("{station_id}", station_id)
}

/// HTTP implementation backed by a pooled `reqwest::Client`.
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
    /// Same URL with the key masked; the only form that reaches logs.
    log_url: String,
}

impl UpstreamClient {
    pub fn from_config(cfg: &TempestConfig) -> Result<Self> {
        Self::new(
            &cfg.upstream.api_template,
            &cfg.station.api_key,
            &cfg.station.station_id,
            cfg.upstream.timeout(),
        )
    }

    pub fn new(template: &str, api_key: &str, station_id: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TempestError::Internal(format!("http client build failed: {e}")))?;

        Ok(Self {
            http,
            url: build_url(template, api_key, station_id),
            log_url: build_url(template, "***", station_id),
        })
    }

    pub fn log_url(&self) -> &str {
        &self.log_url
    }
}

#[async_trait]
impl ObservationSource for UpstreamClient {
    async fn fetch(&self) -> Result<RawObservation> {
        tracing::debug!(url = %self.log_url, "fetching observation");

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| TempestError::FetchFailed(describe(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TempestError::UpstreamStatus(status.as_u16()));
        }

        response.json::<RawObservation>().await.map_err(|e| {
            if e.is_decode() {
                TempestError::MalformedResponse(describe(e))
            } else {
                TempestError::FetchFailed(describe(e))
            }
        })
    }
}

/// Render a reqwest error without its URL, which carries the API key.
fn describe(e: reqwest::Error) -> String {
    if e.is_timeout() {
        return "request timed out".into();
    }
    e.without_url().to_string()
}
