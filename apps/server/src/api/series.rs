use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use etf_tracker_market_data::{load_many, load_series, SeriesOutcome, SeriesRequest};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(serde::Deserialize)]
struct SeriesQuery {
    interval: Option<String>,
}

#[derive(serde::Deserialize)]
struct BatchQuery {
    symbols: String,
    interval: Option<String>,
}

fn request_from(interval: Option<&str>) -> SeriesRequest {
    SeriesRequest::from_label(interval.unwrap_or("daily"))
}

async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(q): Query<SeriesQuery>,
) -> ApiResult<Json<SeriesOutcome>> {
    let symbol = symbol.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(ApiError::BadRequest("Symbol is required".to_string()));
    }
    let outcome = load_series(
        state.source.as_ref(),
        &symbol,
        request_from(q.interval.as_deref()),
    )
    .await;
    Ok(Json(outcome))
}

async fn get_series_batch(
    State(state): State<Arc<AppState>>,
    Query(q): Query<BatchQuery>,
) -> ApiResult<Json<Vec<SeriesOutcome>>> {
    let symbols: Vec<String> = q
        .symbols
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_uppercase)
        .collect();
    let symbols: Vec<&str> = symbols.iter().map(String::as_str).collect();
    if symbols.is_empty() {
        return Err(ApiError::BadRequest("At least one symbol is required".to_string()));
    }
    let outcomes = load_many(
        state.source.as_ref(),
        &symbols,
        request_from(q.interval.as_deref()),
    )
    .await;
    Ok(Json(outcomes))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/series", get(get_series_batch))
        .route("/series/{symbol}", get(get_series))
}
