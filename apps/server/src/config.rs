use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use etf_tracker_market_data::provider::alpha_vantage::BASE_URL;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub alpha_vantage_api_key: String,
    pub alpha_vantage_url: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            alpha_vantage_api_key: "demo".to_string(),
            alpha_vantage_url: BASE_URL.to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30000),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("ETF_LISTEN_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid ETF_LISTEN_ADDR: {}", raw))?,
            Err(_) => defaults.listen_addr,
        };
        let alpha_vantage_api_key = std::env::var("ALPHA_VANTAGE_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.alpha_vantage_api_key);
        let alpha_vantage_url =
            std::env::var("ETF_ALPHA_VANTAGE_URL").unwrap_or(defaults.alpha_vantage_url);
        let cors_allow = std::env::var("ETF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("ETF_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);

        Ok(Self {
            listen_addr,
            alpha_vantage_api_key,
            alpha_vantage_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
