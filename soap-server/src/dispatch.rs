//! The `/` endpoint: performs one status exchange against the configured
//! validator and reports the outcome as JSON.
//!
//! Failures propagate to the HTTP layer instead of being folded into a
//! default status: template problems are 500, anything wrong on the way to
//! or back from the validator is 502. The original demo answered 200 with a
//! zero-valued body in every case; the non-200 codes replace that on purpose.
//! A validator that answers `false` is still a 200.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use soap_core::{ApiError, SoapClient, StatusResult};
use thiserror::Error;
use tokio::task::JoinError;

use crate::config::Config;
use crate::transport::{self, TransportError};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("dispatch task failed: {0}")]
    Task(#[from] JoinError),
}

impl DispatchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Api(ApiError::Template(_)) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Api(_) | Self::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "status exchange failed");
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

fn client_for(config: &Config) -> Result<SoapClient, ApiError> {
    match &config.template {
        Some(source) => SoapClient::with_template(&config.target_url, source),
        None => SoapClient::new(&config.target_url),
    }
}

pub async fn trigger(State(config): State<Arc<Config>>) -> Result<Json<StatusResult>, DispatchError> {
    let client = client_for(&config)?;
    let request = client.build_status_request(&config.request);
    tracing::debug!(url = %request.url, body = %request.body, "sending status request");

    let response = tokio::task::spawn_blocking(move || transport::execute(&request)).await??;
    let result = client.parse_status_response(response)?;

    tracing::info!(status = result.status, "status exchange completed");
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_errors_are_internal() {
        let err = DispatchError::from(ApiError::Template("bad".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_errors_are_bad_gateway() {
        let err = DispatchError::from(ApiError::HttpError {
            status: 404,
            body: String::new(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);

        let err = DispatchError::from(ApiError::DeserializationError("eof".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn configured_template_is_used() {
        let config = Config {
            template: Some("<Ping>{{.ID}}</Ping>".to_string()),
            ..Config::default()
        };
        let client = client_for(&config).unwrap();
        let request = client.build_status_request(&config.request);
        assert_eq!(request.body, "<Ping>SENOUE</Ping>");
        assert_eq!(request.url, "http://localhost:8060/resp");
    }
}
