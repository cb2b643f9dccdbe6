//! HTTP client for the upstream Indodax REST API.
//!
//! One method per upstream endpoint, returning wire types. The upstream is
//! treated as an untrusted collaborator: non-2xx statuses and undecodable
//! bodies surface as errors, never as partial results.

use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::wire::{ChartResponse, TickerEnvelope, WebData};

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

pub struct IndodaxClient {
    api_url: String,
    charts_url: String,
    client: reqwest::Client,
}

impl IndodaxClient {
    /// `timeout` bounds each outbound request end to end.
    pub fn new(api_url: &str, charts_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            charts_url: charts_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Full-market snapshot.
    pub async fn web_data(&self) -> Result<WebData, UpstreamError> {
        let url = format!("{}/webdata", self.api_url);
        self.get(&url).await
    }

    /// Historical candles for one pair/timeframe.
    pub async fn chart_data(
        &self,
        pair: &str,
        timeframe: &str,
    ) -> Result<ChartResponse, UpstreamError> {
        let url = format!("{}/{pair}/{timeframe}/data", self.charts_url);
        self.get(&url).await
    }

    /// Latest ticker for one pair.
    pub async fn pair_ticker(&self, pair: &str) -> Result<TickerEnvelope, UpstreamError> {
        let url = format!("{}/ticker/{pair}", self.api_url);
        self.get(&url).await
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.json::<T>().await?)
    }
}
