//! Market data source abstractions and implementations.
//!
//! This module contains:
//! - The `SeriesSource` trait that every time-series source implements
//! - The Alpha Vantage client

mod traits;

pub mod alpha_vantage;

pub use traits::SeriesSource;
