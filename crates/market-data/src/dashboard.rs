//! Dashboard fund cards.
//!
//! The dashboard shows a fixed set of funds with mock quotes and a
//! six-point intraday sparkline. "Refresh" perturbs the quotes slightly.

use rand::Rng;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SparkPoint {
    pub time: String,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSnapshot {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    /// Preformatted, e.g. `45.2M`
    pub volume: String,
    /// Preformatted, e.g. `$412.8B`
    pub market_cap: String,
    /// Preformatted expense ratio, e.g. `0.09%`
    pub expense: String,
    pub chart_data: Vec<SparkPoint>,
}

impl FundSnapshot {
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

const SPARK_TIMES: [&str; 6] = ["9:30", "10:00", "10:30", "11:00", "11:30", "12:00"];

struct FundSeed {
    symbol: &'static str,
    name: &'static str,
    price: f64,
    change: f64,
    change_percent: f64,
    volume: &'static str,
    market_cap: &'static str,
    expense: &'static str,
    spark: [f64; 6],
}

const FUNDS: &[FundSeed] = &[
    FundSeed {
        symbol: "SPY",
        name: "SPDR S&P 500 ETF Trust",
        price: 445.67,
        change: 2.34,
        change_percent: 0.53,
        volume: "45.2M",
        market_cap: "$412.8B",
        expense: "0.09%",
        spark: [443.33, 444.12, 443.89, 445.23, 444.78, 445.67],
    },
    FundSeed {
        symbol: "QQQ",
        name: "Invesco QQQ Trust",
        price: 378.92,
        change: -1.45,
        change_percent: -0.38,
        volume: "32.1M",
        market_cap: "$198.4B",
        expense: "0.20%",
        spark: [380.37, 379.84, 380.12, 379.23, 378.67, 378.92],
    },
    FundSeed {
        symbol: "IWM",
        name: "iShares Russell 2000 ETF",
        price: 218.45,
        change: 3.21,
        change_percent: 1.49,
        volume: "28.7M",
        market_cap: "$28.9B",
        expense: "0.19%",
        spark: [215.24, 216.78, 217.12, 217.89, 218.23, 218.45],
    },
    FundSeed {
        symbol: "VTI",
        name: "Vanguard Total Stock Market ETF",
        price: 267.89,
        change: 1.78,
        change_percent: 0.67,
        volume: "18.3M",
        market_cap: "$341.2B",
        expense: "0.03%",
        spark: [266.11, 266.89, 267.23, 267.45, 267.67, 267.89],
    },
    FundSeed {
        symbol: "EFA",
        name: "iShares MSCI EAFE ETF",
        price: 78.34,
        change: -0.89,
        change_percent: -1.12,
        volume: "12.4M",
        market_cap: "$68.7B",
        expense: "0.32%",
        spark: [79.23, 78.98, 78.67, 78.45, 78.23, 78.34],
    },
    FundSeed {
        symbol: "EEM",
        name: "iShares MSCI Emerging Markets ETF",
        price: 42.67,
        change: 0.45,
        change_percent: 1.07,
        volume: "35.6M",
        market_cap: "$24.8B",
        expense: "0.68%",
        spark: [42.22, 42.34, 42.45, 42.56, 42.61, 42.67],
    },
];

/// The built-in fund cards.
pub fn default_funds() -> Vec<FundSnapshot> {
    FUNDS
        .iter()
        .map(|seed| FundSnapshot {
            symbol: seed.symbol.to_string(),
            name: seed.name.to_string(),
            price: seed.price,
            change: seed.change,
            change_percent: seed.change_percent,
            volume: seed.volume.to_string(),
            market_cap: seed.market_cap.to_string(),
            expense: seed.expense.to_string(),
            chart_data: SPARK_TIMES
                .iter()
                .zip(seed.spark)
                .map(|(time, price)| SparkPoint {
                    time: time.to_string(),
                    price,
                })
                .collect(),
        })
        .collect()
}

/// Cards whose symbol or name contains `term`, case-insensitively.
pub fn filter_funds(funds: &[FundSnapshot], term: &str) -> Vec<FundSnapshot> {
    let needle = term.trim().to_lowercase();
    funds
        .iter()
        .filter(|fund| {
            fund.symbol.to_lowercase().contains(&needle)
                || fund.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Simulated refresh: price moves by up to ±1, change by ±0.25 and change
/// percent by ±0.1. Sparklines are left as they are.
pub fn refresh<R: Rng>(funds: &[FundSnapshot], rng: &mut R) -> Vec<FundSnapshot> {
    funds
        .iter()
        .map(|fund| FundSnapshot {
            price: fund.price + (rng.gen::<f64>() - 0.5) * 2.0,
            change: fund.change + (rng.gen::<f64>() - 0.5) * 0.5,
            change_percent: fund.change_percent + (rng.gen::<f64>() - 0.5) * 0.2,
            ..fund.clone()
        })
        .collect()
}
