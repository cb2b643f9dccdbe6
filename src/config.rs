use std::env;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Gateway configuration derived from environment variables.
///
/// Read once at startup; everything downstream receives an immutable copy.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind: String,
    pub port: u16,

    /// Browser origins allowed by CORS. A literal `*` entry allows all
    /// origins and is only honoured when set explicitly by the operator.
    pub allowed_origins: Vec<String>,

    // ── Upstream ───────────────────────────────────────────────────
    pub upstream_api_url: String,
    pub upstream_charts_url: String,
    pub upstream_timeout: Duration,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Split a comma-separated origin list, trimming and deduplicating.
fn parse_origins_csv(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    for part in raw.split(',') {
        let s = part.trim().trim_end_matches('/').to_string();
        if s.is_empty() {
            continue;
        }
        if !out.contains(&s) {
            out.push(s);
        }
    }
    out
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let upstream_api_url = env_str("GATEWAY_UPSTREAM_API_URL", "https://indodax.com/api");
        let upstream_charts_url = env_str(
            "GATEWAY_UPSTREAM_CHARTS_URL",
            "https://indodax.com/api/charts",
        );

        Self {
            bind: env_str("GATEWAY_BIND", "127.0.0.1"),
            port: env_u16("GATEWAY_PORT", 5000),
            allowed_origins: parse_origins_csv(&env_str(
                "GATEWAY_ALLOWED_ORIGINS",
                "http://localhost:3000",
            )),
            upstream_api_url,
            upstream_charts_url,
            upstream_timeout: Duration::from_millis(env_u64(
                "GATEWAY_UPSTREAM_TIMEOUT_MS",
                10_000,
            )),
        }
    }

    /// Build the CORS layer from the configured origin allow-list.
    ///
    /// Origins that fail header-value parsing are skipped with a warning so
    /// one bad entry cannot take the whole allow-list down.
    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([Method::GET])
            .allow_headers(Any);

        if self.allowed_origins.iter().any(|o| o == "*") {
            tracing::warn!(
                "GATEWAY_ALLOWED_ORIGINS contains '*'; all browser origins allowed"
            );
            return layer.allow_origin(Any);
        }

        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!("Ignoring unparseable CORS origin: {o}");
                    None
                }
            })
            .collect();

        layer.allow_origin(AllowOrigin::list(origins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn set_env(key: &str, val: &str) -> Option<String> {
        let prev = env::var(key).ok();
        env::set_var(key, val);
        prev
    }

    fn restore_env(key: &str, prev: Option<String>) {
        match prev {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }
    }

    #[test]
    fn parse_origins_csv_trims_and_dedupes() {
        assert_eq!(
            parse_origins_csv("http://localhost:3000, https://app.example.com/ ,http://localhost:3000"),
            vec![
                "http://localhost:3000".to_string(),
                "https://app.example.com".to_string()
            ]
        );
        assert_eq!(parse_origins_csv(""), Vec::<String>::new());
    }

    #[test]
    fn from_env_defaults_do_not_allow_all_origins() {
        let _guard = ENV_LOCK.lock().unwrap();
        let prev = set_env("GATEWAY_ALLOWED_ORIGINS", "");

        let cfg = GatewayConfig::from_env();
        assert_eq!(cfg.allowed_origins, vec!["http://localhost:3000".to_string()]);
        assert!(!cfg.allowed_origins.iter().any(|o| o == "*"));

        restore_env("GATEWAY_ALLOWED_ORIGINS", prev);
    }

    #[test]
    fn from_env_reads_port_and_timeout() {
        let _guard = ENV_LOCK.lock().unwrap();
        let prev_port = set_env("GATEWAY_PORT", "8080");
        let prev_timeout = set_env("GATEWAY_UPSTREAM_TIMEOUT_MS", "2500");

        let cfg = GatewayConfig::from_env();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.upstream_timeout, Duration::from_millis(2500));

        restore_env("GATEWAY_PORT", prev_port);
        restore_env("GATEWAY_UPSTREAM_TIMEOUT_MS", prev_timeout);
    }
}
