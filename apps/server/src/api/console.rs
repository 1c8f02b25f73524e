use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use etf_tracker_market_data::console::{inspect, ConsoleResponse};
use etf_tracker_market_data::provider::alpha_vantage::log_failure;
use etf_tracker_market_data::Interval;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(serde::Deserialize)]
struct ConsoleQuery {
    symbol: Option<String>,
    interval: Option<String>,
}

/// Run one raw provider call and report it with request metadata.
async fn run_console(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ConsoleQuery>,
) -> ApiResult<Json<ConsoleResponse>> {
    let symbol = q
        .symbol
        .as_deref()
        .map(|s| s.trim().to_ascii_uppercase())
        .unwrap_or_default();
    if symbol.is_empty() {
        return Err(ApiError::BadRequest("Symbol is required".to_string()));
    }
    let interval = q.interval.as_deref().unwrap_or("daily");

    let Some(_guard) = state.try_begin_console() else {
        return Err(ApiError::Conflict(
            "A console request is already running".to_string(),
        ));
    };

    let started = Instant::now();
    let result = state
        .source
        .fetch(&symbol, Interval::from_label(interval))
        .await;
    if let Err(e) = &result {
        log_failure(&symbol, e);
    }
    Ok(Json(inspect(
        &symbol,
        interval,
        result,
        started.elapsed(),
        Utc::now(),
    )))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/console", get(run_console))
}
