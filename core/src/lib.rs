//! Synchronous client core for the SOAP-style status exchange.
//!
//! # Overview
//! Renders request envelopes from a textual template, describes the POST
//! that carries them as an `HttpRequest`, and parses the validator's
//! `HttpResponse` into a `StatusResult`. The caller executes the actual HTTP
//! round-trip (host-does-IO pattern).
//!
//! # Design
//! - `SoapClient` is stateless: it holds the endpoint URL and a parsed template.
//! - The I/O boundary sits between `build_status_request` and
//!   `parse_status_response`.
//! - DTOs are defined independently from the server crate; integration tests
//!   catch schema drift.

pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod types;

pub use client::SoapClient;
pub use envelope::{render_envelope, Template};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse};
pub use types::{Credentials, Identity, SoapRequest, StatusResult};
