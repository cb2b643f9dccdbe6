//! Wire types for the upstream Indodax API.
//!
//! Everything here is untrusted: fields default to absent, and numbers may
//! arrive as JSON strings or numbers. Conversion to response types happens
//! in the route layer.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Coerce an upstream JSON value into a finite `f64`.
///
/// Accepts numbers and numeric strings; anything else (including NaN and
/// infinities) is treated as absent.
pub fn parse_f64_value(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .filter(|f| f.is_finite())
}

/// Full-market snapshot (`GET {api}/webdata`).
#[derive(Debug, Deserialize)]
pub struct WebData {
    #[serde(default)]
    pub pairs: Option<HashMap<String, PairSummary>>,
}

/// One trading-pair entry of the snapshot.
#[derive(Debug, Deserialize)]
pub struct PairSummary {
    #[serde(default)]
    last_price: Option<Value>,
    #[serde(default)]
    percent_change: Option<Value>,
    #[serde(default)]
    volume_idr: Option<Value>,
}

impl PairSummary {
    pub fn last_price(&self) -> Option<f64> {
        self.last_price.as_ref().and_then(parse_f64_value)
    }

    pub fn percent_change(&self) -> Option<f64> {
        self.percent_change.as_ref().and_then(parse_f64_value)
    }

    pub fn quote_volume(&self) -> Option<f64> {
        self.volume_idr.as_ref().and_then(parse_f64_value)
    }
}

/// Chart-data envelope (`GET {charts}/{pair}/{timeframe}/data`).
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    #[serde(default)]
    pub data: Option<Vec<ChartPoint>>,
}

/// One raw candle. `time` is epoch seconds.
#[derive(Debug, Deserialize)]
pub struct ChartPoint {
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub open: Option<Value>,
    #[serde(default)]
    pub high: Option<Value>,
    #[serde(default)]
    pub low: Option<Value>,
    #[serde(default)]
    pub close: Option<Value>,
    #[serde(default)]
    pub volume: Option<Value>,
}

/// Per-pair ticker envelope (`GET {api}/ticker/{pair}`).
#[derive(Debug, Deserialize)]
pub struct TickerEnvelope {
    #[serde(default)]
    pub ticker: Option<TickerInfo>,
}

#[derive(Debug, Deserialize)]
pub struct TickerInfo {
    #[serde(default)]
    last: Option<Value>,
}

impl TickerInfo {
    /// The latest trade price, when present and finite.
    pub fn last_price(&self) -> Option<f64> {
        self.last.as_ref().and_then(parse_f64_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_f64_value_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_f64_value(&json!(1.5)), Some(1.5));
        assert_eq!(parse_f64_value(&json!(42)), Some(42.0));
        assert_eq!(parse_f64_value(&json!("0.5")), Some(0.5));
        assert_eq!(parse_f64_value(&json!(" 10 ")), Some(10.0));
    }

    #[test]
    fn parse_f64_value_rejects_garbage_and_non_finite() {
        assert_eq!(parse_f64_value(&json!("abc")), None);
        assert_eq!(parse_f64_value(&json!("")), None);
        assert_eq!(parse_f64_value(&json!(null)), None);
        assert_eq!(parse_f64_value(&json!({})), None);
        assert_eq!(parse_f64_value(&json!("inf")), None);
        assert_eq!(parse_f64_value(&json!("NaN")), None);
    }

    #[test]
    fn webdata_tolerates_missing_pairs() {
        let w: WebData = serde_json::from_value(json!({})).unwrap();
        assert!(w.pairs.is_none());

        let w: WebData = serde_json::from_value(json!({"server_time": 1})).unwrap();
        assert!(w.pairs.is_none());
    }

    #[test]
    fn pair_summary_reads_string_or_number_fields() {
        let p: PairSummary = serde_json::from_value(json!({
            "last_price": "1050000000",
            "percent_change": -2.5,
            "volume_idr": "123456789.5",
        }))
        .unwrap();
        assert_eq!(p.last_price(), Some(1_050_000_000.0));
        assert_eq!(p.percent_change(), Some(-2.5));
        assert_eq!(p.quote_volume(), Some(123_456_789.5));
    }

    #[test]
    fn ticker_envelope_without_last_yields_no_price() {
        let t: TickerEnvelope = serde_json::from_value(json!({"ticker": {}})).unwrap();
        assert_eq!(t.ticker.and_then(|i| i.last_price()), None);

        let t: TickerEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(t.ticker.is_none());
    }
}
