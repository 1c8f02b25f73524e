use serde::{Deserialize, Serialize};

/// A chart-ready price point.
///
/// Numeric fields that could not be parsed hold `NaN` (serialized as
/// `null` by serde_json); an unparseable volume is `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPoint {
    /// Display label (`09:35 AM` or `Jan 5`)
    pub time: String,

    /// Provider timestamp the point was read from
    pub timestamp: String,

    /// Closing price
    pub price: f64,

    pub high: f64,

    pub low: f64,

    pub open: f64,

    pub volume: Option<u64>,
}

/// A point of the console's full-history chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: String,
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}
