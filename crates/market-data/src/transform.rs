//! Reshape a provider payload into chart-ready points.
//!
//! The provider returns its bars as a JSON object keyed by timestamp, and
//! object key order carries no meaning here. Entries are therefore ordered
//! by their parsed timestamp before the display window is cut.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::models::{BarEntry, NormalizedPoint, RawPayload, SeriesRequest, Timeframe};

/// Transform a payload into at most `timeframe.point_limit()` points,
/// oldest first.
///
/// Returns an empty vector when the payload has no known time-series
/// section. Never fails: a field that does not parse becomes `NaN` (or a
/// `None` volume) on its own point only.
pub fn transform(payload: &RawPayload, timeframe: Timeframe) -> Vec<NormalizedPoint> {
    let Some(section) = payload.series() else {
        return Vec::new();
    };

    let mut entries: Vec<(Option<NaiveDateTime>, BarEntry)> = section
        .into_entries()
        .into_iter()
        .map(|entry| (entry.parsed_timestamp(), entry))
        .collect();

    // Newest first; unparseable timestamps sort as the oldest.
    entries.sort_by(|(a_ts, a), (b_ts, b)| newest_first(a_ts, &a.timestamp, b_ts, &b.timestamp));
    entries.truncate(timeframe.point_limit());
    entries.reverse();

    entries
        .into_iter()
        .map(|(parsed, entry)| to_point(parsed, entry, timeframe))
        .collect()
}

/// [`transform`] with the timeframe given as a label.
pub fn transform_label(payload: &RawPayload, timeframe: &str) -> Vec<NormalizedPoint> {
    transform(payload, Timeframe::from_label(timeframe))
}

/// [`transform`] using the timeframe of a [`SeriesRequest`].
pub fn transform_request(payload: &RawPayload, request: &SeriesRequest) -> Vec<NormalizedPoint> {
    transform(payload, request.timeframe)
}

fn newest_first(
    a_ts: &Option<NaiveDateTime>,
    a_raw: &str,
    b_ts: &Option<NaiveDateTime>,
    b_raw: &str,
) -> Ordering {
    // Option orders None < Some, so comparing b to a puts None last.
    b_ts.cmp(a_ts).then_with(|| b_raw.cmp(a_raw))
}

/// Display label for a bar time; falls back to the raw provider key.
pub fn format_label(parsed: Option<NaiveDateTime>, raw: &str, timeframe: Timeframe) -> String {
    match parsed {
        Some(ts) => ts.format(timeframe.label_format()).to_string(),
        None => raw.to_string(),
    }
}

fn to_point(parsed: Option<NaiveDateTime>, entry: BarEntry, timeframe: Timeframe) -> NormalizedPoint {
    let BarEntry { timestamp, bar } = entry;
    NormalizedPoint {
        time: format_label(parsed, &timestamp, timeframe),
        price: bar.close_value(),
        high: bar.high_value(),
        low: bar.low_value(),
        open: bar.open_value(),
        volume: bar.volume_value(),
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_timestamp as bar_time;
    use chrono::{Duration, NaiveDate};
    use serde_json::{json, Map, Value};

    fn bar(open: f64, high: f64, low: f64, close: f64, volume: u64) -> Value {
        json!({
            "1. open": format!("{open:.4}"),
            "2. high": format!("{high:.4}"),
            "3. low": format!("{low:.4}"),
            "4. close": format!("{close:.4}"),
            "5. volume": volume.to_string()
        })
    }

    /// A daily payload of `n` sessions ending 2024-03-01, keys inserted
    /// newest first. Close of day `i` (0 = oldest) is `100 + i`.
    fn daily_payload(n: usize) -> RawPayload {
        let last = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut series = Map::new();
        for back in 0..n {
            let day = last - Duration::days(back as i64);
            let i = (n - 1 - back) as f64;
            series.insert(
                day.format("%Y-%m-%d").to_string(),
                bar(99.0 + i, 101.0 + i, 98.0 + i, 100.0 + i, 1_000 + back as u64),
            );
        }
        let mut root = Map::new();
        root.insert(
            "Meta Data".to_string(),
            json!({"1. Information": "Daily Time Series with Splits and Dividend Events", "2. Symbol": "SPY"}),
        );
        root.insert("Time Series (Daily)".to_string(), Value::Object(series));
        RawPayload::new(root)
    }

    fn intraday_payload(n: usize) -> RawPayload {
        let start = NaiveDate::from_ymd_opt(2024, 1, 12)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let mut series = Map::new();
        for i in 0..n {
            let ts = start + Duration::minutes(5 * i as i64);
            series.insert(
                ts.format("%Y-%m-%d %H:%M:%S").to_string(),
                bar(1.0, 2.0, 0.5, 400.0 + i as f64, 10),
            );
        }
        let mut root = Map::new();
        root.insert("Time Series (5min)".to_string(), Value::Object(series));
        RawPayload::new(root)
    }

    #[test]
    fn test_spy_daily_end_to_end() {
        let payload = daily_payload(25);
        let points = transform_label(&payload, "1D");

        assert_eq!(points.len(), 20);
        // Oldest of the most recent 20 is day index 5.
        assert_eq!(points[0].price, 105.0);
        assert_eq!(points[19].price, 124.0);
        assert_eq!(points[19].timestamp, "2024-03-01");
        assert_eq!(points[19].time, "Mar 1");
        for pair in points.windows(2) {
            assert!(bar_time(&pair[0].timestamp) < bar_time(&pair[1].timestamp));
        }
    }

    #[test]
    fn test_intraday_keeps_78_points() {
        let payload = intraday_payload(100);
        let points = transform(&payload, Timeframe::Intraday);
        assert_eq!(points.len(), 78);
        assert_eq!(points[77].price, 499.0);
        assert_eq!(points[0].price, 422.0);
        for pair in points.windows(2) {
            assert!(bar_time(&pair[0].timestamp) < bar_time(&pair[1].timestamp));
        }
    }

    #[test]
    fn test_intraday_label_format() {
        let payload = intraday_payload(3);
        let points = transform(&payload, Timeframe::Intraday);
        assert_eq!(points[0].time, "09:30 AM");
        assert_eq!(points[2].time, "09:40 AM");
    }

    #[test]
    fn test_short_series_returns_all_points() {
        let payload = daily_payload(7);
        let points = transform(&payload, Timeframe::Daily);
        assert_eq!(points.len(), 7);
        assert_eq!(points[0].price, 100.0);
    }

    #[test]
    fn test_no_time_series_returns_empty() {
        let payload: RawPayload =
            serde_json::from_value(json!({"Meta Data": {"2. Symbol": "SPY"}})).unwrap();
        assert!(transform(&payload, Timeframe::Daily).is_empty());
        assert!(transform(&RawPayload::default(), Timeframe::Intraday).is_empty());
    }

    #[test]
    fn test_order_does_not_depend_on_key_order() {
        // Same bars, keys given oldest first.
        let newest_first = daily_payload(25);
        let section = newest_first.get("Time Series (Daily)").unwrap().as_object().unwrap();
        let mut keys: Vec<&String> = section.keys().collect();
        keys.sort();
        let mut ascending = Map::new();
        for key in keys {
            ascending.insert(key.clone(), section[key].clone());
        }
        let mut root = Map::new();
        root.insert("Time Series (Daily)".to_string(), Value::Object(ascending));
        let oldest_first = RawPayload::new(root);

        assert_eq!(
            transform(&newest_first, Timeframe::Daily),
            transform(&oldest_first, Timeframe::Daily)
        );
    }

    #[test]
    fn test_bad_field_only_affects_its_point() {
        let payload: RawPayload = serde_json::from_value(json!({
            "Time Series (Daily)": {
                "2024-01-16": {
                    "1. open": "10", "2. high": "12", "3. low": "9",
                    "4. close": "not-a-number", "5. volume": "500"
                },
                "2024-01-15": {
                    "1. open": "8", "2. high": "11", "3. low": "7",
                    "4. close": "10.5", "5. volume": "400"
                }
            }
        }))
        .unwrap();

        let points = transform(&payload, Timeframe::Daily);
        assert_eq!(points.len(), 2);

        assert_eq!(points[0].price, 10.5);
        assert_eq!(points[0].volume, Some(400));

        assert!(points[1].price.is_nan());
        assert_eq!(points[1].open, 10.0);
        assert_eq!(points[1].high, 12.0);
        assert_eq!(points[1].low, 9.0);
        assert_eq!(points[1].volume, Some(500));
    }

    #[test]
    fn test_bad_volume_is_none() {
        let payload: RawPayload = serde_json::from_value(json!({
            "Time Series (Daily)": {
                "2024-01-15": {
                    "1. open": "8", "2. high": "11", "3. low": "7",
                    "4. close": "10.5", "5. volume": "n/a"
                }
            }
        }))
        .unwrap();
        let points = transform(&payload, Timeframe::Daily);
        assert_eq!(points[0].volume, None);
        assert_eq!(points[0].price, 10.5);
    }

    #[test]
    fn test_unparseable_timestamp_sorts_oldest() {
        let payload: RawPayload = serde_json::from_value(json!({
            "Time Series (Daily)": {
                "garbage": { "4. close": "1" },
                "2024-01-15": { "4. close": "2" }
            }
        }))
        .unwrap();
        let points = transform(&payload, Timeframe::Daily);
        assert_eq!(points[0].time, "garbage");
        assert_eq!(points[1].time, "Jan 15");
    }

    #[test]
    fn test_transform_request_uses_timeframe() {
        let payload = intraday_payload(100);
        let request = SeriesRequest::from_label("daily");
        assert_eq!(transform_request(&payload, &request).len(), 20);
    }
}
