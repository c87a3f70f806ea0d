//! Domain DTOs for the status exchange.
//!
//! # Design
//! These types mirror the validator's envelope but are defined independently
//! from the server crate. Integration tests catch any schema drift between
//! the two.

use serde::{Deserialize, Serialize};

/// The id/password pair carried in the request envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub id: String,
    pub password: String,
}

/// Caller identity carried alongside the credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub key: String,
}

/// The in-memory request record rendered into an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoapRequest {
    pub credentials: Credentials,
    pub identity: Identity,
}

impl SoapRequest {
    pub fn new(id: &str, password: &str, key: &str) -> Self {
        Self {
            credentials: Credentials {
                id: id.to_string(),
                password: password.to_string(),
            },
            identity: Identity {
                key: key.to_string(),
            },
        }
    }

    /// The fixed request the demo service sends when nothing is configured.
    pub fn reference() -> Self {
        Self::new("SENOUE", "Password", "12345678")
    }
}

/// Outcome of a validation round-trip.
///
/// Read from `<Response><status>..</status></Response>` and written back to
/// the outer caller as `{"status": bool}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "Response")]
pub struct StatusResult {
    pub status: bool,
}
