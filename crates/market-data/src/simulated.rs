//! Synthetic price series.
//!
//! Used for symbols the provider does not cover and as the fallback when a
//! fetch fails. Output has the same shape and ordering as
//! [`transform`](crate::transform::transform).

use chrono::{Duration, NaiveDateTime};
use rand::Rng;

use crate::models::{NormalizedPoint, Timeframe};
use crate::transform::format_label;

/// Largest single-step move, as a fraction of the previous close.
const MAX_STEP: f64 = 0.006;

/// Reference price for a symbol: stable per symbol, between 40 and 500.
pub fn base_price(symbol: &str) -> f64 {
    let hash = symbol
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    40.0 + f64::from(hash % 46_000) / 100.0
}

fn step(timeframe: Timeframe) -> Duration {
    match timeframe {
        Timeframe::Intraday => Duration::minutes(5),
        Timeframe::Daily => Duration::days(1),
    }
}

/// Generate `timeframe.point_limit()` points ending at `anchor`, oldest first.
pub fn simulate_series<R: Rng>(
    symbol: &str,
    timeframe: Timeframe,
    anchor: NaiveDateTime,
    rng: &mut R,
) -> Vec<NormalizedPoint> {
    let count = timeframe.point_limit();
    let step = step(timeframe);
    let mut close = base_price(symbol);

    (0..count)
        .map(|i| {
            let at = anchor - step * (count - 1 - i) as i32;
            let open = close;
            close = (open * (1.0 + rng.gen_range(-MAX_STEP..=MAX_STEP))).max(0.01);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..=MAX_STEP / 2.0));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..=MAX_STEP / 2.0));
            let timestamp = at.format("%Y-%m-%d %H:%M:%S").to_string();
            NormalizedPoint {
                time: format_label(Some(at), &timestamp, timeframe),
                timestamp,
                price: round_cents(close),
                high: round_cents(high),
                low: round_cents(low),
                open: round_cents(open),
                volume: Some(rng.gen_range(100_000..5_000_000)),
            }
        })
        .collect()
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_timestamp;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn anchor() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 12)
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_point_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            simulate_series("VWRL", Timeframe::Intraday, anchor(), &mut rng).len(),
            78
        );
        assert_eq!(
            simulate_series("VWRL", Timeframe::Daily, anchor(), &mut rng).len(),
            20
        );
    }

    #[test]
    fn test_series_is_chronological_and_ends_at_anchor() {
        let mut rng = StdRng::seed_from_u64(2);
        let points = simulate_series("IMEU", Timeframe::Intraday, anchor(), &mut rng);
        assert_eq!(points.last().unwrap().timestamp, "2024-01-12 16:00:00");
        assert_eq!(points.last().unwrap().time, "04:00 PM");
        for pair in points.windows(2) {
            assert!(parse_timestamp(&pair[0].timestamp) < parse_timestamp(&pair[1].timestamp));
        }
    }

    #[test]
    fn test_bars_are_consistent() {
        let mut rng = StdRng::seed_from_u64(3);
        for point in simulate_series("VUSA", Timeframe::Daily, anchor(), &mut rng) {
            assert!(point.price > 0.0);
            assert!(point.high >= point.low);
            assert!(point.high + 0.01 >= point.price.max(point.open));
            assert!(point.low - 0.01 <= point.price.min(point.open));
            assert!(point.volume.is_some());
        }
    }

    #[test]
    fn test_base_price_is_stable() {
        assert_eq!(base_price("SPY"), base_price("SPY"));
        let p = base_price("EQQQ");
        assert!((40.0..500.0).contains(&p));
    }
}
