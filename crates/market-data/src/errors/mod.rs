//! Error types for the market data crate.
//!
//! This module provides:
//! - [`FetchError`]: the failure taxonomy of a single provider request
//! - [`RejectionKind`]: which provider marker caused a rejection

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Why the provider refused to return a time series.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectionKind {
    /// `Error Message` field, usually an invalid symbol or function.
    Error,
    /// `Note` field, HTTP 429, or an `Information` field about call frequency.
    RateLimit,
    /// Any other `Information` field (premium endpoint, demo key, etc.).
    Notice,
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Error => "error",
            Self::RateLimit => "rate limit",
            Self::Notice => "notice",
        };
        f.write_str(label)
    }
}

/// Coarse classification of a [`FetchError`], used for logging.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchErrorKind {
    Transport,
    Decode,
    ProviderRejected,
}

/// Errors that can occur while fetching a time series.
///
/// All variants collapse to "no data" at the caller boundary
/// (see [`AlphaVantageClient::fetch_or_none`](crate::AlphaVantageClient::fetch_or_none));
/// the variant only matters for diagnostics.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a usable response: DNS, connect, timeout,
    /// body read, or a non-success HTTP status.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not a JSON object.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The provider answered with an error, rate-limit, or notice marker.
    #[error("Provider rejected request ({kind}): {message}")]
    ProviderRejected {
        /// Which marker was present
        kind: RejectionKind,
        /// The provider's message, verbatim
        message: String,
    },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Transport(_) => FetchErrorKind::Transport,
            Self::Decode(_) => FetchErrorKind::Decode,
            Self::ProviderRejected { .. } => FetchErrorKind::ProviderRejected,
        }
    }

    /// Returns true when the provider throttled the request.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::ProviderRejected {
                kind: RejectionKind::RateLimit,
                ..
            }
        )
    }
}
