//! Error types for the catalog and audio boundaries.
//!
//! Neither escapes its boundary: catalog errors collapse into an empty result
//! list, audio errors into an `AudioEvent::Failed` for the current source.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("catalog returned HTTP {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("catalog error {kind}: {message}")]
    Service { kind: String, message: String },
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("track has no preview")]
    MissingPreview,

    #[error("preview stream failed: {0}")]
    Stream(String),

    #[error("no audio received within {0:?}")]
    Timeout(std::time::Duration),

    #[error("no audio output device: {0}")]
    OutputDevice(#[from] rodio::StreamError),

    #[error("could not create sink: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("{0}")]
    Runtime(String),
}
