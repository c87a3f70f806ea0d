//! Error types for the SOAP client core.
//!
//! # Design
//! Template problems are reported separately from wire problems so a host can
//! tell "we never produced a request" apart from "the peer answered badly."
//! Non-200 responses land in `HttpError` with the raw status code and body
//! for debugging.

use thiserror::Error;

/// Errors returned by `SoapClient` and the envelope builder.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The envelope template could not be parsed.
    #[error("template error: {0}")]
    Template(String),

    /// The server answered with a status other than 200.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body was not a readable status document.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}
