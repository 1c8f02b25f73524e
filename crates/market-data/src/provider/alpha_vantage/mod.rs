//! Alpha Vantage time-series client.
//!
//! Requests the adjusted daily, weekly, and monthly series and the 5-minute
//! intraday series, and returns the response body untouched once it has
//! been checked for the provider's error markers.
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute. The
//! client does not throttle; a throttled call comes back as
//! [`FetchError::ProviderRejected`] with [`RejectionKind::RateLimit`].

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::errors::{FetchError, FetchErrorKind, RejectionKind};
use crate::models::{Interval, RawPayload, ERROR_MESSAGE_KEY, INFORMATION_KEY, NOTE_KEY};
use crate::provider::SeriesSource;

pub const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Alpha Vantage time-series client.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool.
#[derive(Clone, Debug)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    /// Create a client with a default `reqwest::Client`.
    ///
    /// No timeout is configured here; pass a prepared client to
    /// [`with_client`](Self::with_client) to change transport behavior.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_key)
    }

    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query parameters for one request, credential last.
    fn query_params(&self, symbol: &str, interval: Interval) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("function", interval.function_code().to_string()),
            ("symbol", symbol.to_string()),
            ("adjusted", "true".to_string()),
            ("outputsize", "compact".to_string()),
            ("datatype", "json".to_string()),
        ];
        if interval.is_intraday() {
            params.push(("interval", interval.label().to_string()));
        }
        params.push(("apikey", self.api_key.clone()));
        params
    }

    fn masked(&self, url: &str) -> String {
        if self.api_key.is_empty() {
            url.to_string()
        } else {
            url.replace(&self.api_key, "***")
        }
    }

    /// Fetch one time series.
    ///
    /// Issues exactly one GET. The parsed body is returned unchanged when it
    /// carries no error marker.
    pub async fn fetch(&self, symbol: &str, interval: Interval) -> Result<RawPayload, FetchError> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(symbol, interval))
            .build()?;

        debug!("Alpha Vantage request: {}", self.masked(request.url().as_str()));

        let response = self.client.execute(request).await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::ProviderRejected {
                kind: RejectionKind::RateLimit,
                message: format!("HTTP {}", status),
            });
        }

        let body = response.error_for_status()?.text().await?;
        let payload = classify_body(&body)?;

        debug!(
            "Alpha Vantage: fetched {} {} entries for {}",
            payload.series().map_or(0, |s| s.len()),
            interval,
            symbol
        );

        Ok(payload)
    }

    /// Like [`fetch`](Self::fetch), with the interval given as a label.
    /// Unknown labels request the daily series.
    pub async fn fetch_label(&self, symbol: &str, interval: &str) -> Result<RawPayload, FetchError> {
        self.fetch(symbol, Interval::from_label(interval)).await
    }

    /// Fetch and collapse every failure to `None`, logging the cause.
    pub async fn fetch_or_none(&self, symbol: &str, interval: Interval) -> Option<RawPayload> {
        match self.fetch(symbol, interval).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                log_failure(symbol, &e);
                None
            }
        }
    }
}

/// Log a fetch failure at a level matching its cause.
pub fn log_failure(symbol: &str, e: &FetchError) {
    match e.kind() {
        FetchErrorKind::ProviderRejected => {
            warn!("Alpha Vantage: API limit or error for {}: {}", symbol, e)
        }
        FetchErrorKind::Transport | FetchErrorKind::Decode => {
            error!("Alpha Vantage: error fetching data for {}: {}", symbol, e)
        }
    }
}

/// Parse a response body and check it for provider markers.
///
/// - `Error Message` always rejects.
/// - `Note` always rejects as a rate limit.
/// - `Information` rejects as a rate limit when it talks about call
///   frequency, rejects as a notice when no time series came with it, and
///   is only logged otherwise.
pub fn classify_body(body: &str) -> Result<RawPayload, FetchError> {
    let payload = RawPayload::parse(body)?;
    check_api_error(&payload)?;
    Ok(payload)
}

/// A marker only counts when it carries something: `null` and `""` are ignored.
fn marker(payload: &RawPayload, key: &str) -> Option<String> {
    match payload.get(key)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn mentions_rate_limit(msg: &str) -> bool {
    let lower = msg.to_lowercase();
    lower.contains("call frequency") || lower.contains("rate limit")
}

fn check_api_error(payload: &RawPayload) -> Result<(), FetchError> {
    if let Some(message) = marker(payload, ERROR_MESSAGE_KEY) {
        return Err(FetchError::ProviderRejected {
            kind: RejectionKind::Error,
            message,
        });
    }

    if let Some(message) = marker(payload, NOTE_KEY) {
        return Err(FetchError::ProviderRejected {
            kind: RejectionKind::RateLimit,
            message,
        });
    }

    if let Some(message) = marker(payload, INFORMATION_KEY) {
        if mentions_rate_limit(&message) {
            return Err(FetchError::ProviderRejected {
                kind: RejectionKind::RateLimit,
                message,
            });
        }
        if payload.series().is_none() {
            return Err(FetchError::ProviderRejected {
                kind: RejectionKind::Notice,
                message,
            });
        }
        warn!("Alpha Vantage info: {}", message);
    }

    Ok(())
}

#[async_trait]
impl SeriesSource for AlphaVantageClient {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self, symbol: &str, interval: Interval) -> Result<RawPayload, FetchError> {
        AlphaVantageClient::fetch(self, symbol, interval).await
    }
}
