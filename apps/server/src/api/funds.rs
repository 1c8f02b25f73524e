use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use etf_tracker_market_data::catalog::{self, CatalogEntry};
use etf_tracker_market_data::dashboard::{filter_funds, refresh};

use crate::main_lib::{AppState, FundBoard};

#[derive(serde::Deserialize)]
struct SearchQuery {
    search: Option<String>,
}

async fn list_catalog(Query(q): Query<SearchQuery>) -> Json<Vec<CatalogEntry>> {
    Json(catalog::search(q.search.as_deref().unwrap_or("")))
}

async fn list_funds(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> Json<FundBoard> {
    let board = state.funds.read().await;
    let funds = match q.search.as_deref() {
        Some(term) => filter_funds(&board.funds, term),
        None => board.funds.clone(),
    };
    Json(FundBoard {
        funds,
        last_updated: board.last_updated,
    })
}

/// Jitter every card and stamp the board with the current time.
async fn refresh_funds(State(state): State<Arc<AppState>>) -> Json<FundBoard> {
    let mut board = state.funds.write().await;
    let funds = refresh(&board.funds, &mut rand::thread_rng());
    board.funds = funds;
    board.last_updated = Utc::now();
    tracing::debug!("Refreshed {} fund cards", board.funds.len());
    Json(board.clone())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/catalog", get(list_catalog))
        .route("/funds", get(list_funds))
        .route("/funds/refresh", post(refresh_funds))
}
