//! Error types for each layer of the pipeline.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to an upstream HTTP service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {service} failed: {source}")]
    Network {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    BadStatus { service: &'static str, status: StatusCode, body: String },

    #[error("failed to parse {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} returned no results for '{query}'")]
    EmptyResult { service: &'static str, query: String },
}

/// Failure reading from or writing to the reading store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Persistence(String),

    #[error("reading for '{city}' was not written: no rows affected")]
    WriteNotConfirmed { city: String },

    #[error("no readings for city '{0}'")]
    NotFound(String),
}

impl StoreError {
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Why a single scheduler tick was abandoned.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("geocoding failed: {0}")]
    Geocoding(#[source] ClientError),

    #[error("forecast failed: {0}")]
    Forecast(#[source] ClientError),

    #[error("invalid observation time '{value}': {source}")]
    Parse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("failed to store reading: {0}")]
    Store(#[from] StoreError),
}
