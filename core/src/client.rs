//! Stateless HTTP request builder and response parser for the status exchange.
//!
//! # Design
//! `SoapClient` holds only the endpoint URL and a parsed template and carries
//! no mutable state between calls. `build_status_request` produces an
//! `HttpRequest`; `parse_status_response` consumes an `HttpResponse`. The
//! caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use crate::envelope::{Template, DEFAULT_TEMPLATE};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{SoapRequest, StatusResult};

pub const CONTENT_TYPE_XML: &str = "application/xml; charset=utf-8";

/// Synchronous, stateless client for the validator endpoint.
#[derive(Debug, Clone)]
pub struct SoapClient {
    endpoint: String,
    template: Template,
}

impl SoapClient {
    pub fn new(endpoint: &str) -> Result<Self, ApiError> {
        Self::with_template(endpoint, DEFAULT_TEMPLATE)
    }

    /// Like `new`, but renders envelopes from `source` instead of the
    /// default template.
    pub fn with_template(endpoint: &str, source: &str) -> Result<Self, ApiError> {
        let template = Template::parse(source).inspect_err(|e| {
            tracing::error!(error = %e, "failed to parse envelope template");
        })?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            template,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_status_request(&self, request: &SoapRequest) -> HttpRequest {
        HttpRequest {
            url: self.endpoint.clone(),
            headers: vec![("content-type".to_string(), CONTENT_TYPE_XML.to_string())],
            body: self.template.render(request),
        }
    }

    pub fn parse_status_response(&self, response: HttpResponse) -> Result<StatusResult, ApiError> {
        if response.status != 200 {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        quick_xml::de::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SoapClient {
        SoapClient::new("http://localhost:8060/resp").unwrap()
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_status_request_produces_correct_request() {
        let req = client().build_status_request(&SoapRequest::reference());
        assert_eq!(req.url, "http://localhost:8060/resp");
        assert_eq!(
            req.headers,
            vec![(
                "content-type".to_string(),
                "application/xml; charset=utf-8".to_string()
            )]
        );
        assert!(req.body.contains("<id>SENOUE</id>"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = SoapClient::new("http://localhost:8060/resp/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8060/resp");
    }

    #[test]
    fn custom_template_is_used() {
        let client = SoapClient::with_template("http://host/resp", "<Login>{{.Key}}</Login>").unwrap();
        let req = client.build_status_request(&SoapRequest::reference());
        assert_eq!(req.body, "<Login>12345678</Login>");
    }

    #[test]
    fn bad_custom_template_fails_construction() {
        let err = SoapClient::with_template("http://host/resp", "{{.Nope}}").unwrap_err();
        assert!(matches!(err, ApiError::Template(_)));
    }

    #[test]
    fn parse_status_true() {
        let result = client()
            .parse_status_response(ok("<Response>\n    <status>true</status>\n</Response>"))
            .unwrap();
        assert!(result.status);
    }

    #[test]
    fn parse_status_false() {
        let result = client()
            .parse_status_response(ok("<Response><status>false</status></Response>"))
            .unwrap();
        assert!(!result.status);
    }

    #[test]
    fn parse_status_wrong_status_code() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_status_response(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_status_malformed_xml() {
        let err = client()
            .parse_status_response(ok("<Response><status>true</stat"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_status_non_boolean() {
        let err = client()
            .parse_status_response(ok("<Response><status>maybe</status></Response>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
