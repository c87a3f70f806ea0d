//! Runtime configuration for the service.
//!
//! Defaults reproduce the demo setup: listen on port 8060 and call our own
//! validator with the reference credentials.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use soap_core::SoapRequest;

pub const DEFAULT_TARGET_URL: &str = "http://localhost:8060/resp";
pub const DEFAULT_EXPECTED_ID: &str = "SENOUE";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Validator endpoint the `/` handler posts to.
    pub target_url: String,
    /// Credential id the `/resp` validator accepts.
    pub expected_id: String,
    /// Request sent by the `/` handler.
    pub request: SoapRequest,
    /// Envelope template source; `None` uses the built-in template.
    pub template: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8060)),
            target_url: DEFAULT_TARGET_URL.to_string(),
            expected_id: DEFAULT_EXPECTED_ID.to_string(),
            request: SoapRequest::reference(),
            template: None,
        }
    }
}

/// SOAP-style status exchange demo server.
#[derive(Parser, Debug)]
#[command(name = "soap-server", about = "XML status exchange demo server")]
pub struct Args {
    /// Address to listen on.
    #[arg(long, env = "SOAP_LISTEN", default_value = "0.0.0.0:8060")]
    pub listen: SocketAddr,

    /// Validator endpoint called by `/`.
    #[arg(long, env = "SOAP_TARGET_URL", default_value = DEFAULT_TARGET_URL)]
    pub target_url: String,

    /// Credential id accepted by `/resp`.
    #[arg(long, env = "SOAP_EXPECTED_ID", default_value = DEFAULT_EXPECTED_ID)]
    pub expected_id: String,

    /// Credential id sent by `/`.
    #[arg(long, env = "SOAP_ID", default_value = "SENOUE")]
    pub id: String,

    /// Password sent by `/`.
    #[arg(long, env = "SOAP_PASSWORD", default_value = "Password")]
    pub password: String,

    /// Identity key sent by `/`.
    #[arg(long, env = "SOAP_KEY", default_value = "12345678")]
    pub key: String,

    /// File holding a custom envelope template.
    #[arg(long, env = "SOAP_TEMPLATE")]
    pub template: Option<PathBuf>,
}

impl TryFrom<Args> for Config {
    type Error = std::io::Error;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let template = args.template.map(std::fs::read_to_string).transpose()?;
        Ok(Self {
            listen_addr: args.listen,
            target_url: args.target_url,
            expected_id: args.expected_id,
            request: SoapRequest::new(&args.id, &args.password, &args.key),
            template,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_setup() {
        let config = Config::default();
        assert_eq!(config.listen_addr.port(), 8060);
        assert_eq!(config.target_url, "http://localhost:8060/resp");
        assert_eq!(config.expected_id, "SENOUE");
        assert_eq!(config.request, SoapRequest::reference());
        assert!(config.template.is_none());
    }

    #[test]
    fn args_without_flags_equal_defaults() {
        let args = Args::try_parse_from(["soap-server"]).unwrap();
        let config = Config::try_from(args).unwrap();
        let default = Config::default();
        assert_eq!(config.listen_addr, default.listen_addr);
        assert_eq!(config.target_url, default.target_url);
        assert_eq!(config.request, default.request);
    }

    #[test]
    fn args_override_request_fields() {
        let args = Args::try_parse_from([
            "soap-server",
            "--id",
            "GUEST",
            "--key",
            "k1",
            "--target-url",
            "http://validator:9000/resp",
        ])
        .unwrap();
        let config = Config::try_from(args).unwrap();
        assert_eq!(config.request.credentials.id, "GUEST");
        assert_eq!(config.request.credentials.password, "Password");
        assert_eq!(config.request.identity.key, "k1");
        assert_eq!(config.target_url, "http://validator:9000/resp");
    }

    #[test]
    fn missing_template_file_is_an_error() {
        let args = Args::try_parse_from([
            "soap-server",
            "--template",
            "/nonexistent/envelope.xml.tmpl",
        ])
        .unwrap();
        assert!(Config::try_from(args).is_err());
    }
}
