/// Market table injected into the handler layer.
///
/// Holds the ticker pair allow-list, the display⇄native quote-currency
/// suffix pair, and the interval → upstream chart-timeframe table. Built
/// once at startup; tests substitute alternates through `AppState`.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Quote-currency suffix shown to the frontend, e.g. `USDT`.
    display_quote: String,
    /// Quote-currency suffix used in upstream pair keys, e.g. `idr`.
    native_quote: String,
    /// Pair keys the ticker endpoint is permitted to return, in output order.
    ticker_pairs: Vec<String>,
    /// Supported interval codes and their upstream chart timeframes.
    intervals: Vec<(String, String)>,
}

impl MarketConfig {
    /// The Indodax production table: IDR pairs displayed with a USDT suffix,
    /// chart timeframes in minutes.
    pub fn indodax() -> Self {
        let ticker_pairs = [
            "btcidr", "ethidr", "bnbidr", "solanaidr", "xpridr", "dogeidr",
            "trxidr", "ltcidr", "adaidr", "dotidr", "maticidr", "avaxidr",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let intervals = [("15m", "15"), ("1h", "60"), ("4h", "240")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            display_quote: "USDT".to_string(),
            native_quote: "idr".to_string(),
            ticker_pairs,
            intervals,
        }
    }

    pub fn ticker_pairs(&self) -> &[String] {
        &self.ticker_pairs
    }

    /// Display symbol for an upstream pair key: `btcidr` ⇒ `BTCUSDT`.
    ///
    /// Returns `None` when the key does not end with the native quote suffix
    /// or has an empty base.
    pub fn display_symbol(&self, pair_key: &str) -> Option<String> {
        let key = pair_key.trim().to_ascii_lowercase();
        let base = key.strip_suffix(&self.native_quote)?;
        if base.is_empty() {
            return None;
        }
        Some(format!("{}{}", base.to_ascii_uppercase(), self.display_quote))
    }

    /// Upstream pair key for a display symbol: `BTCUSDT` ⇒ `btcidr`.
    ///
    /// Inverse of [`display_symbol`](Self::display_symbol); case-insensitive
    /// on input. Returns `None` for symbols the suffix rule cannot translate.
    pub fn pair_key(&self, display: &str) -> Option<String> {
        let sym = display.trim().to_ascii_uppercase();
        let base = sym.strip_suffix(&self.display_quote)?;
        if base.is_empty() {
            return None;
        }
        Some(format!("{}{}", base.to_ascii_lowercase(), self.native_quote))
    }

    /// Upstream chart timeframe for an interval code, e.g. `1h` ⇒ `60`.
    pub fn chart_timeframe(&self, interval: &str) -> Option<&str> {
        let iv = interval.trim();
        self.intervals
            .iter()
            .find(|(k, _)| k == iv)
            .map(|(_, v)| v.as_str())
    }
}
