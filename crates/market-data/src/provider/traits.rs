//! Market data source trait definitions.

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::{Interval, RawPayload};

/// A source of raw time-series payloads.
///
/// Implementations issue exactly one request per call and keep no state
/// between calls. Batch callers (see [`crate::service`]) rely on this to
/// treat concurrent fetches as independent.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Unique identifier for this source, used in logs.
    fn id(&self) -> &'static str;

    /// Fetch the time series of `symbol` at `interval`.
    async fn fetch(&self, symbol: &str, interval: Interval) -> Result<RawPayload, FetchError>;
}
