use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::state::AppState;
use crate::wire::{parse_f64_value, ChartPoint};

// ── Query params ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KlinesQuery {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    interval: Option<String>,
    /// Absent or 0 ⇒ all available candles.
    #[serde(default)]
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    #[serde(default)]
    symbol: Option<String>,
}

// ── Response types ───────────────────────────────────────────────────────

/// 24-hour summary for one allow-listed pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSummary {
    pub symbol: String,
    pub last_price: f64,
    pub price_change_percent: f64,
    pub quote_volume: f64,
}

/// One OHLCV candle. `open_time` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub price: f64,
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/indodax/ticker", get(api_ticker))
        .route("/api/indodax/klines", get(api_klines))
        .route("/api/indodax/price", get(api_price))
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn api_ticker(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TickerSummary>>, GatewayError> {
    let web = state
        .upstream
        .web_data()
        .await
        .map_err(|e| GatewayError::upstream("ticker", "failed to fetch ticker data", e))?;

    let mut out = Vec::new();
    let Some(pairs) = web.pairs else {
        // Snapshot without a pairs map ⇒ empty listing, not an error.
        return Ok(Json(out));
    };

    for key in state.markets.ticker_pairs() {
        let Some(entry) = pairs.get(key) else {
            continue;
        };
        let Some(symbol) = state.markets.display_symbol(key) else {
            continue;
        };
        let (Some(last_price), Some(change), Some(volume)) = (
            entry.last_price(),
            entry.percent_change(),
            entry.quote_volume(),
        ) else {
            tracing::debug!(pair = %key, "skipping pair with unparseable numeric fields");
            continue;
        };

        out.push(TickerSummary {
            symbol,
            last_price,
            price_change_percent: change,
            quote_volume: volume,
        });
    }

    Ok(Json(out))
}

async fn api_klines(
    State(state): State<Arc<AppState>>,
    Query(q): Query<KlinesQuery>,
) -> Result<Json<Vec<Candle>>, GatewayError> {
    let symbol = required_param(q.symbol.as_deref(), "symbol")?;
    let interval = required_param(q.interval.as_deref(), "interval")?;

    let timeframe = state
        .markets
        .chart_timeframe(interval)
        .ok_or_else(|| GatewayError::BadRequest(format!("unsupported interval: {interval}")))?;
    let pair = state
        .markets
        .pair_key(symbol)
        .ok_or_else(|| GatewayError::BadRequest(format!("invalid symbol: {symbol}")))?;

    let chart = state
        .upstream
        .chart_data(&pair, timeframe)
        .await
        .map_err(|e| GatewayError::upstream("klines", "failed to fetch kline data", e))?;

    let mut candles: Vec<Candle> = chart
        .data
        .unwrap_or_default()
        .iter()
        .filter_map(format_candle)
        .collect();

    // Keep only the newest `limit` entries; upstream order is chronological.
    if let Some(limit) = q.limit.filter(|l| *l > 0) {
        let limit = limit as usize;
        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }
    }

    Ok(Json(candles))
}

async fn api_price(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PriceQuery>,
) -> Result<Json<PriceQuote>, GatewayError> {
    let symbol = required_param(q.symbol.as_deref(), "symbol")?.to_ascii_uppercase();

    let pair = state
        .markets
        .pair_key(&symbol)
        .ok_or_else(|| GatewayError::BadRequest(format!("invalid symbol: {symbol}")))?;

    let envelope = state
        .upstream
        .pair_ticker(&pair)
        .await
        .map_err(|e| GatewayError::upstream("price", "failed to fetch price", e))?;

    match envelope.ticker.as_ref().and_then(|t| t.last_price()) {
        Some(price) => Ok(Json(PriceQuote { price })),
        None => Err(GatewayError::NotFound(format!(
            "price not found for symbol {symbol}"
        ))),
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────

fn required_param<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, GatewayError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| GatewayError::BadRequest(format!("missing {name}")))
}

/// Coerce one raw chart point into a response candle.
///
/// Upstream `time` is epoch seconds; the frontend wants milliseconds. A point
/// with a missing or non-finite field is dropped.
fn format_candle(p: &ChartPoint) -> Option<Candle> {
    Some(Candle {
        open_time: p.time?.checked_mul(1000)?,
        open: p.open.as_ref().and_then(parse_f64_value)?,
        high: p.high.as_ref().and_then(parse_f64_value)?,
        low: p.low.as_ref().and_then(parse_f64_value)?,
        close: p.close.as_ref().and_then(parse_f64_value)?,
        volume: p.volume.as_ref().and_then(parse_f64_value)?,
    })
}
