//! Error types for the PokéAPI client core.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a dangling resource reference
//! is the most common way the external API breaks an aggregation. All other
//! non-200 responses land in `HttpError` with the raw status code and body for
//! debugging. Every variant carries the URL that failed so a single log line
//! identifies the broken sub-resource.

use thiserror::Error;

/// Result alias used throughout the core.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors produced while fetching or decoding PokéAPI resources.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 for the requested resource.
    #[error("resource not found: {url}")]
    NotFound { url: String },

    /// The server returned a status other than 200 or 404.
    #[error("HTTP {status} from {url}: {body}")]
    HttpError {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body did not match the expected JSON shape.
    #[error("failed to decode response from {url}: {source}")]
    Deserialization {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request never produced a response (connect, TLS, timeout, body read).
    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    /// The transport itself could not be constructed.
    #[error("client setup failed: {0}")]
    Client(String),
}
