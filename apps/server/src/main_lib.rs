use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use etf_tracker_market_data::dashboard::{default_funds, FundSnapshot};
use etf_tracker_market_data::{AlphaVantageClient, SeriesSource};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Fund cards as last shown, with the time they were produced.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundBoard {
    pub funds: Vec<FundSnapshot>,
    pub last_updated: DateTime<Utc>,
}

pub struct AppState {
    pub source: Arc<dyn SeriesSource>,
    pub funds: RwLock<FundBoard>,
    /// Set while a console request is running.
    console_busy: AtomicBool,
}

/// Releases the console slot on drop.
pub struct ConsoleGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for ConsoleGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl AppState {
    pub fn new(source: Arc<dyn SeriesSource>) -> Self {
        Self {
            source,
            funds: RwLock::new(FundBoard {
                funds: default_funds(),
                last_updated: Utc::now(),
            }),
            console_busy: AtomicBool::new(false),
        }
    }

    /// Claim the console slot, or `None` if a console request is running.
    pub fn try_begin_console(&self) -> Option<ConsoleGuard<'_>> {
        self.console_busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ConsoleGuard {
                busy: &self.console_busy,
            })
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("ETF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let client = AlphaVantageClient::new(config.alpha_vantage_api_key.clone())
        .with_base_url(config.alpha_vantage_url.clone());
    tracing::info!("Alpha Vantage endpoint: {}", client.base_url());
    Arc::new(AppState::new(Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_slot_is_exclusive() {
        let state = build_state(&Config::default());
        let guard = state.try_begin_console();
        assert!(guard.is_some());
        assert!(state.try_begin_console().is_none());
        drop(guard);
        assert!(state.try_begin_console().is_some());
    }
}
