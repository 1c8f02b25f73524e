use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Points kept for an intraday chart (one session of 5-minute bars).
pub const INTRADAY_POINT_LIMIT: usize = 78;

/// Points kept for every non-intraday chart.
pub const DAILY_POINT_LIMIT: usize = 20;

/// Request granularity sent to the provider.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "5min")]
    FiveMin,
    #[default]
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
}

impl Interval {
    /// Parse a label. Unknown labels fall back to [`Interval::Daily`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "5min" => Self::FiveMin,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::Daily,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FiveMin => "5min",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Alpha Vantage `function` parameter for this granularity.
    pub fn function_code(self) -> &'static str {
        match self {
            Self::FiveMin => "TIME_SERIES_INTRADAY",
            Self::Daily => "TIME_SERIES_DAILY_ADJUSTED",
            Self::Weekly => "TIME_SERIES_WEEKLY_ADJUSTED",
            Self::Monthly => "TIME_SERIES_MONTHLY_ADJUSTED",
        }
    }

    pub fn is_intraday(self) -> bool {
        matches!(self, Self::FiveMin)
    }

    /// The display timeframe matching this granularity.
    pub fn timeframe(self) -> Timeframe {
        if self.is_intraday() {
            Timeframe::Intraday
        } else {
            Timeframe::Daily
        }
    }
}

impl FromStr for Interval {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display window applied by the transformer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Timeframe {
    Intraday,
    #[default]
    Daily,
}

impl Timeframe {
    /// `"5min"` selects the intraday window; any other label is daily.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("5min") {
            Self::Intraday
        } else {
            Self::Daily
        }
    }

    pub fn point_limit(self) -> usize {
        match self {
            Self::Intraday => INTRADAY_POINT_LIMIT,
            Self::Daily => DAILY_POINT_LIMIT,
        }
    }

    /// chrono format string for the display label.
    pub fn label_format(self) -> &'static str {
        match self {
            Self::Intraday => "%I:%M %p",
            Self::Daily => "%b %-d",
        }
    }
}

impl FromStr for Timeframe {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

/// A fetch granularity paired with the display window used on its result.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRequest {
    pub interval: Interval,
    pub timeframe: Timeframe,
}

impl SeriesRequest {
    pub fn new(interval: Interval, timeframe: Timeframe) -> Self {
        Self {
            interval,
            timeframe,
        }
    }

    /// Derive the timeframe from the interval.
    pub fn from_interval(interval: Interval) -> Self {
        Self::new(interval, interval.timeframe())
    }

    pub fn from_label(label: &str) -> Self {
        Self::from_interval(Interval::from_label(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_labels() {
        assert_eq!(Interval::from_label("5min"), Interval::FiveMin);
        assert_eq!(Interval::from_label("daily"), Interval::Daily);
        assert_eq!(Interval::from_label("Weekly"), Interval::Weekly);
        assert_eq!(Interval::from_label("monthly"), Interval::Monthly);
    }

    #[test]
    fn test_unknown_interval_falls_back_to_daily() {
        assert_eq!(Interval::from_label("1h"), Interval::Daily);
        assert_eq!(Interval::from_label(""), Interval::Daily);
        assert_eq!("yearly".parse::<Interval>().unwrap(), Interval::Daily);
    }

    #[test]
    fn test_function_codes() {
        assert_eq!(Interval::FiveMin.function_code(), "TIME_SERIES_INTRADAY");
        assert_eq!(Interval::Daily.function_code(), "TIME_SERIES_DAILY_ADJUSTED");
        assert_eq!(Interval::Weekly.function_code(), "TIME_SERIES_WEEKLY_ADJUSTED");
        assert_eq!(Interval::Monthly.function_code(), "TIME_SERIES_MONTHLY_ADJUSTED");
    }

    #[test]
    fn test_timeframe_limits() {
        assert_eq!(Timeframe::from_label("5min").point_limit(), 78);
        assert_eq!(Timeframe::from_label("1D").point_limit(), 20);
        assert_eq!(Timeframe::from_label("daily"), Timeframe::Daily);
    }

    #[test]
    fn test_series_request_couples_interval_and_timeframe() {
        let intraday = SeriesRequest::from_label("5min");
        assert_eq!(intraday.interval, Interval::FiveMin);
        assert_eq!(intraday.timeframe, Timeframe::Intraday);

        let weekly = SeriesRequest::from_interval(Interval::Weekly);
        assert_eq!(weekly.timeframe, Timeframe::Daily);
    }

    #[test]
    fn test_interval_serde_uses_labels() {
        let json = serde_json::to_string(&Interval::FiveMin).unwrap();
        assert_eq!(json, "\"5min\"");
        let parsed: Interval = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(parsed, Interval::Monthly);
    }
}
