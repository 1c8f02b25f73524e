//! ETF Tracker Market Data Crate
//!
//! This crate fetches daily and intraday price series for ETFs from Alpha
//! Vantage and turns them into chart-ready points.
//!
//! # Overview
//!
//! The market data crate supports:
//! - A fixed ETF catalog split into provider-backed and simulated listings
//! - One raw fetch per symbol and granularity, with provider rejections
//!   classified separately from transport and decode failures
//! - Normalization of the provider's series maps into bounded, ordered points
//! - Simulated series for uncovered symbols and failed fetches
//! - The API test console view of a single raw call
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  SeriesRequest   | --> |   SeriesSource   |  (AlphaVantageClient)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    RawPayload    |  (provider body, untouched)
//!                          +------------------+
//!                            |             |
//!                            v             v
//!                 +----------------+  +-----------------+
//!                 |   transform    |  |    console      |
//!                 +----------------+  +-----------------+
//!                            |
//!                            v
//!                 +-------------------+
//!                 | NormalizedPoint[] |
//!                 +-------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Interval`] - Fetch granularity sent to the provider
//! - [`Timeframe`] - Display timeframe that bounds and labels the output
//! - [`SeriesRequest`] - An interval and timeframe that belong together
//! - [`RawPayload`] - The provider's JSON body
//! - [`NormalizedPoint`] - One chart point
//! - [`FetchError`] - Why a fetch produced no payload

pub mod catalog;
pub mod console;
pub mod dashboard;
pub mod errors;
pub mod models;
pub mod provider;
pub mod service;
pub mod simulated;
pub mod transform;

// Re-export all public types from models
pub use models::{
    ChartPoint, Interval, MetaData, NormalizedPoint, RawBar, RawPayload, SeriesGranularity,
    SeriesRequest, SeriesSection, Timeframe, DAILY_POINT_LIMIT, INTRADAY_POINT_LIMIT,
};

// Re-export provider types
pub use provider::alpha_vantage::AlphaVantageClient;
pub use provider::SeriesSource;

// Re-export error types
pub use errors::{FetchError, FetchErrorKind, RejectionKind};

pub use service::{load_many, load_series, Origin, SeriesOutcome};
pub use transform::{transform, transform_label, transform_request};
