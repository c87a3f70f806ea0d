//! SOAP-style status exchange service.
//!
//! Hosts two endpoints on one router:
//! - `/` builds the configured request envelope, posts it to the target
//!   validator and returns the outcome as JSON.
//! - `/resp` validates a posted envelope and answers with a status XML
//!   document.
//!
//! Handlers share only an immutable `Arc<Config>`.

pub mod config;
pub mod dispatch;
pub mod transport;
pub mod validator;

use std::sync::Arc;

use axum::{
    routing::{any, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use dispatch::DispatchError;
pub use validator::StatusDocument;

pub fn app(config: Config) -> Router {
    Router::new()
        .route("/", any(dispatch::trigger))
        .route("/resp", post(validator::resp))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener, config: Config) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}
