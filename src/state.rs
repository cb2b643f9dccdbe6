use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::markets::MarketConfig;
use crate::upstream::IndodaxClient;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    pub config: GatewayConfig,
    pub markets: MarketConfig,
    pub upstream: IndodaxClient,
}

impl AppState {
    /// The market table is injected separately from the env-derived config
    /// so tests can substitute an alternate pair/interval table.
    pub fn new(config: GatewayConfig, markets: MarketConfig) -> Arc<Self> {
        let upstream = IndodaxClient::new(
            &config.upstream_api_url,
            &config.upstream_charts_url,
            config.upstream_timeout,
        );

        Arc::new(Self {
            config,
            markets,
            upstream,
        })
    }
}
