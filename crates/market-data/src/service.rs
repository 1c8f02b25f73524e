//! Series loading with simulated fallback.
//!
//! This is the caller side of the fetcher: it decides whether a symbol is
//! fetched at all, and turns every failure into a clearly labeled
//! simulated series so one bad symbol never breaks a batch.

use chrono::Utc;
use futures::future::join_all;
use log::debug;
use serde::Serialize;

use crate::catalog;
use crate::models::{NormalizedPoint, SeriesRequest};
use crate::provider::alpha_vantage::log_failure;
use crate::provider::SeriesSource;
use crate::simulated::simulate_series;
use crate::transform::transform_request;

/// Where a series came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    Provider,
    Simulated,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOutcome {
    pub symbol: String,
    pub origin: Origin,
    pub request: SeriesRequest,
    pub points: Vec<NormalizedPoint>,
}

impl SeriesOutcome {
    pub fn is_simulated(&self) -> bool {
        self.origin == Origin::Simulated
    }
}

fn simulated(symbol: &str, request: SeriesRequest) -> SeriesOutcome {
    let mut rng = rand::thread_rng();
    let points = simulate_series(symbol, request.timeframe, Utc::now().naive_utc(), &mut rng);
    SeriesOutcome {
        symbol: symbol.to_string(),
        origin: Origin::Simulated,
        request,
        points,
    }
}

/// Load one symbol.
///
/// Symbols without provider coverage are simulated without a request.
/// A failed fetch, or a payload without any bars, also falls back to
/// simulated data.
pub async fn load_series<S>(source: &S, symbol: &str, request: SeriesRequest) -> SeriesOutcome
where
    S: SeriesSource + ?Sized,
{
    if !catalog::is_provider_backed(symbol) {
        debug!("{} has no provider coverage, simulating", symbol);
        return simulated(symbol, request);
    }

    match source.fetch(symbol, request.interval).await {
        Ok(payload) => {
            let points = transform_request(&payload, &request);
            if points.is_empty() {
                debug!("{}: {} returned no bars, simulating", source.id(), symbol);
                return simulated(symbol, request);
            }
            SeriesOutcome {
                symbol: symbol.to_string(),
                origin: Origin::Provider,
                request,
                points,
            }
        }
        Err(e) => {
            log_failure(symbol, &e);
            simulated(symbol, request)
        }
    }
}

/// Load several symbols concurrently.
///
/// Each symbol is independent: a failure degrades only that symbol.
/// Results are returned in input order.
pub async fn load_many<S>(source: &S, symbols: &[&str], request: SeriesRequest) -> Vec<SeriesOutcome>
where
    S: SeriesSource + ?Sized,
{
    join_all(
        symbols
            .iter()
            .map(|symbol| load_series(source, symbol, request)),
    )
    .await
}
