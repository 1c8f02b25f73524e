use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Top-level fields the provider uses to refuse a request.
pub const ERROR_MESSAGE_KEY: &str = "Error Message";
pub const NOTE_KEY: &str = "Note";
pub const INFORMATION_KEY: &str = "Information";

const META_DATA_KEY: &str = "Meta Data";

/// Granularity of a time-series section.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesGranularity {
    Intraday,
    Daily,
    Weekly,
    Monthly,
}

/// Known section keys, in resolution precedence.
const SECTION_KEYS: &[(SeriesGranularity, &str)] = &[
    (SeriesGranularity::Intraday, "Time Series (5min)"),
    (SeriesGranularity::Intraday, "Time Series (1min)"),
    (SeriesGranularity::Intraday, "Time Series (15min)"),
    (SeriesGranularity::Intraday, "Time Series (30min)"),
    (SeriesGranularity::Intraday, "Time Series (60min)"),
    (SeriesGranularity::Daily, "Time Series (Daily)"),
    (SeriesGranularity::Weekly, "Weekly Adjusted Time Series"),
    (SeriesGranularity::Weekly, "Weekly Time Series"),
    (SeriesGranularity::Monthly, "Monthly Adjusted Time Series"),
    (SeriesGranularity::Monthly, "Monthly Time Series"),
];

/// Untyped provider response, kept as received.
///
/// The only structural guarantee is that the body was a JSON object.
/// Typed views are computed on demand by [`meta`](Self::meta) and
/// [`series`](Self::series).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload(Map<String, Value>);

impl RawPayload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a response body. Fails unless the body is a JSON object.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the string value of a top-level field, if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Size in bytes of the compact JSON encoding.
    pub fn encoded_len(&self) -> usize {
        serde_json::to_string(&self.0).map_or(0, |s| s.len())
    }

    pub fn meta(&self) -> MetaData {
        let fields = match self.0.get(META_DATA_KEY) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        MetaData { fields }
    }

    /// Resolve the single time-series section of this payload.
    ///
    /// When several known sections are present the first in precedence
    /// order (intraday, daily, weekly, monthly) wins.
    pub fn series(&self) -> Option<SeriesSection> {
        SECTION_KEYS.iter().find_map(|(granularity, key)| {
            let Value::Object(entries) = self.0.get(*key)? else {
                return None;
            };
            let bars = entries
                .iter()
                .map(|(timestamp, value)| BarEntry {
                    timestamp: timestamp.clone(),
                    bar: RawBar::from_value(value),
                })
                .collect();
            Some(SeriesSection::new(*granularity, bars))
        })
    }
}

impl FromStr for RawPayload {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Informational `Meta Data` block.
///
/// Field names carry a numeric prefix that differs per function
/// (`"4. Interval"` on intraday, `"4. Output Size"` on daily), so lookups
/// match on the name after the prefix.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetaData {
    fields: Map<String, Value>,
}

impl MetaData {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(key, value)| {
            let bare = key.split_once(". ").map_or(key.as_str(), |(_, rest)| rest);
            if bare.eq_ignore_ascii_case(name) {
                value.as_str()
            } else {
                None
            }
        })
    }

    pub fn information(&self) -> Option<&str> {
        self.field("Information")
    }

    pub fn symbol(&self) -> Option<&str> {
        self.field("Symbol")
    }

    pub fn last_refreshed(&self) -> Option<&str> {
        self.field("Last Refreshed")
    }

    pub fn interval(&self) -> Option<&str> {
        self.field("Interval")
    }

    pub fn output_size(&self) -> Option<&str> {
        self.field("Output Size")
    }

    pub fn time_zone(&self) -> Option<&str> {
        self.field("Time Zone")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One OHLCV bar with its numeric fields still string-encoded.
///
/// Fields that are missing or not a string/number deserialize to `None`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawBar {
    #[serde(rename = "1. open", default, deserialize_with = "lenient_string")]
    pub open: Option<String>,
    #[serde(rename = "2. high", default, deserialize_with = "lenient_string")]
    pub high: Option<String>,
    #[serde(rename = "3. low", default, deserialize_with = "lenient_string")]
    pub low: Option<String>,
    #[serde(rename = "4. close", default, deserialize_with = "lenient_string")]
    pub close: Option<String>,
    #[serde(rename = "5. adjusted close", default, deserialize_with = "lenient_string")]
    pub adjusted_close: Option<String>,
    #[serde(rename = "5. volume", default, deserialize_with = "lenient_string")]
    pub volume: Option<String>,
    /// Adjusted series shift volume to slot 6
    #[serde(rename = "6. volume", default, deserialize_with = "lenient_string")]
    pub adjusted_volume: Option<String>,
}

impl RawBar {
    /// Read a bar from any JSON value; non-objects give an all-empty bar.
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    pub fn open_value(&self) -> f64 {
        parse_f64(self.open.as_deref())
    }

    pub fn high_value(&self) -> f64 {
        parse_f64(self.high.as_deref())
    }

    pub fn low_value(&self) -> f64 {
        parse_f64(self.low.as_deref())
    }

    pub fn close_value(&self) -> f64 {
        parse_f64(self.close.as_deref())
    }

    pub fn volume_value(&self) -> Option<u64> {
        self.volume
            .as_deref()
            .or(self.adjusted_volume.as_deref())
            .and_then(|s| s.trim().parse().ok())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Parse a numeric string; anything unparseable is `NaN`.
fn parse_f64(s: Option<&str>) -> f64 {
    s.and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// A bar keyed by its provider timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct BarEntry {
    pub timestamp: String,
    pub bar: RawBar,
}

impl BarEntry {
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

/// Parse a provider timestamp (`2024-01-15 16:00:00`, `2024-01-15 16:00`,
/// or `2024-01-15`). Dates without a time resolve to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// The populated time-series section, tagged by granularity.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesSection {
    Intraday(Vec<BarEntry>),
    Daily(Vec<BarEntry>),
    Weekly(Vec<BarEntry>),
    Monthly(Vec<BarEntry>),
}

impl SeriesSection {
    pub fn new(granularity: SeriesGranularity, entries: Vec<BarEntry>) -> Self {
        match granularity {
            SeriesGranularity::Intraday => Self::Intraday(entries),
            SeriesGranularity::Daily => Self::Daily(entries),
            SeriesGranularity::Weekly => Self::Weekly(entries),
            SeriesGranularity::Monthly => Self::Monthly(entries),
        }
    }

    pub fn granularity(&self) -> SeriesGranularity {
        match self {
            Self::Intraday(_) => SeriesGranularity::Intraday,
            Self::Daily(_) => SeriesGranularity::Daily,
            Self::Weekly(_) => SeriesGranularity::Weekly,
            Self::Monthly(_) => SeriesGranularity::Monthly,
        }
    }

    pub fn entries(&self) -> &[BarEntry] {
        match self {
            Self::Intraday(e) | Self::Daily(e) | Self::Weekly(e) | Self::Monthly(e) => e,
        }
    }

    pub fn into_entries(self) -> Vec<BarEntry> {
        match self {
            Self::Intraday(e) | Self::Daily(e) | Self::Weekly(e) | Self::Monthly(e) => e,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
