//! Blocking HTTP execution of `HttpRequest` values built by the core.
//!
//! Status codes are returned as data rather than errors so the core client
//! decides how to interpret them. A fresh agent is created per call: no
//! pooling, no timeout, no retry.

use soap_core::{HttpRequest, HttpResponse};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("request to {url} failed: {source}")]
pub struct TransportError {
    url: String,
    #[source]
    source: ureq::Error,
}

pub fn execute(request: &HttpRequest) -> Result<HttpResponse, TransportError> {
    let fail = |source| TransportError {
        url: request.url.clone(),
        source,
    };

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut builder = agent.post(&request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let mut response = builder.send(request.body.as_bytes()).map_err(fail)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_string().map_err(fail)?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
