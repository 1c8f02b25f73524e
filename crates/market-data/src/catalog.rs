//! Fixed ETF catalog.
//!
//! US listings have Alpha Vantage coverage. The European UCITS listings do
//! not, and are always served simulated data.

use serde::Serialize;

/// US ETFs supported by Alpha Vantage.
pub const US_ETFS: &[&str] = &[
    "SPY", "VOO", "IVV", "VTI", "QQQ", "VUG", "BND", "AGG", "GLD", "SCHD", "VYM",
];

/// European ETFs that need simulated data.
pub const EUROPEAN_ETFS: &[&str] = &["IMEU", "IMAE", "VUSA", "VUAG", "EQQQ", "VWRL", "VWRP"];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Region {
    #[serde(rename = "US")]
    Us,
    Europe,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub symbol: &'static str,
    pub region: Region,
    /// Whether the provider carries this symbol
    pub supported: bool,
}

/// Every catalog entry, US listings first.
pub fn entries() -> Vec<CatalogEntry> {
    let us = US_ETFS.iter().map(|&symbol| CatalogEntry {
        symbol,
        region: Region::Us,
        supported: true,
    });
    let europe = EUROPEAN_ETFS.iter().map(|&symbol| CatalogEntry {
        symbol,
        region: Region::Europe,
        supported: false,
    });
    us.chain(europe).collect()
}

/// Case-insensitive symbol substring search. An empty term matches all.
pub fn search(term: &str) -> Vec<CatalogEntry> {
    let needle = term.trim().to_lowercase();
    entries()
        .into_iter()
        .filter(|entry| entry.symbol.to_lowercase().contains(&needle))
        .collect()
}

pub fn lookup(symbol: &str) -> Option<CatalogEntry> {
    entries()
        .into_iter()
        .find(|entry| entry.symbol.eq_ignore_ascii_case(symbol.trim()))
}

/// Symbols outside the catalog are assumed provider-backed and left to
/// fail remotely.
pub fn is_provider_backed(symbol: &str) -> bool {
    lookup(symbol).map_or(true, |entry| entry.supported)
}
