//! API test console: wrap one raw provider call with request metadata.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::errors::FetchError;
use crate::models::{ChartPoint, RawPayload};

/// Entries shown on the console chart.
pub const CONSOLE_CHART_POINTS: usize = 50;

pub const FAILED_REQUEST: &str = "Failed Request";
pub const NO_DATA_MESSAGE: &str = "API request failed or returned no data";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleMetadata {
    pub symbol: String,
    pub request_time_ms: u64,
    /// e.g. `"18342 bytes"`
    pub response_size: String,
    pub timestamp: DateTime<Utc>,
    pub data_points: usize,
    /// `Meta Data` information line, or a failure label
    pub api_function: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleResponse {
    /// The provider body as received, `null` on failure
    pub data: Value,
    pub metadata: ConsoleMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub chart: Vec<ChartPoint>,
}

impl ConsoleResponse {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Build the console view of one fetch.
///
/// Failures are reduced to a generic message; the cause is expected to
/// have been logged by the caller.
pub fn inspect(
    symbol: &str,
    requested_interval: &str,
    result: Result<RawPayload, FetchError>,
    elapsed: Duration,
    now: DateTime<Utc>,
) -> ConsoleResponse {
    let request_time_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(payload) => {
            let meta = payload.meta();
            let metadata = ConsoleMetadata {
                symbol: symbol.to_string(),
                request_time_ms,
                response_size: format!("{} bytes", payload.encoded_len()),
                timestamp: now,
                data_points: payload.series().map_or(0, |s| s.len()),
                api_function: meta.information().unwrap_or("Unknown").to_string(),
                interval: Some(meta.interval().unwrap_or(requested_interval).to_string()),
                output_size: Some(meta.output_size().unwrap_or("compact").to_string()),
            };
            let chart = chart_points(&payload);
            ConsoleResponse {
                data: payload.into_value(),
                metadata,
                error: None,
                chart,
            }
        }
        Err(_) => ConsoleResponse {
            data: Value::Null,
            metadata: ConsoleMetadata {
                symbol: symbol.to_string(),
                request_time_ms,
                response_size: "0 bytes".to_string(),
                timestamp: now,
                data_points: 0,
                api_function: FAILED_REQUEST.to_string(),
                interval: None,
                output_size: None,
            },
            error: Some(NO_DATA_MESSAGE.to_string()),
            chart: Vec::new(),
        },
    }
}

/// Every entry of the payload's series sorted oldest first, keeping the
/// last [`CONSOLE_CHART_POINTS`].
pub fn chart_points(payload: &RawPayload) -> Vec<ChartPoint> {
    let Some(section) = payload.series() else {
        return Vec::new();
    };

    let mut entries: Vec<_> = section
        .into_entries()
        .into_iter()
        .map(|entry| (entry.parsed_timestamp(), entry))
        .collect();
    entries.sort_by(|(a_ts, a), (b_ts, b)| a_ts.cmp(b_ts).then_with(|| a.timestamp.cmp(&b.timestamp)));

    let skip = entries.len().saturating_sub(CONSOLE_CHART_POINTS);
    entries
        .into_iter()
        .skip(skip)
        .map(|(parsed, entry)| ChartPoint {
            date: parsed
                .map(|ts| ts.format("%-m/%-d/%Y").to_string())
                .unwrap_or_else(|| entry.timestamp.clone()),
            open: entry.bar.open_value(),
            high: entry.bar.high_value(),
            low: entry.bar.low_value(),
            close: entry.bar.close_value(),
            volume: entry.bar.volume_value(),
            timestamp: entry.timestamp,
        })
        .collect()
}
