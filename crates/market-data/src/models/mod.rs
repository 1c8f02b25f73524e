//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `request` - Fetch granularity, display timeframe, and their pairing (SeriesRequest)
//! - `payload` - The untyped provider response and its typed views (RawPayload, SeriesSection)
//! - `point` - Chart-ready output records (NormalizedPoint, ChartPoint)

mod payload;
mod point;
mod request;

pub use payload::{
    parse_timestamp, BarEntry, MetaData, RawBar, RawPayload, SeriesGranularity, SeriesSection,
    ERROR_MESSAGE_KEY, INFORMATION_KEY, NOTE_KEY,
};
pub use point::{ChartPoint, NormalizedPoint};
pub use request::{Interval, SeriesRequest, Timeframe, DAILY_POINT_LIMIT, INTRADAY_POINT_LIMIT};
