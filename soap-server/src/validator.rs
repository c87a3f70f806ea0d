//! The `/resp` endpoint: checks the credential id in a posted envelope.
//!
//! Always answers 200 with an indented `<Response>` document. A body that
//! does not parse is handled as an empty envelope, so it reports `false`
//! just like a wrong id; the two cases are logged differently.
//!
//! Field text is taken verbatim: surrounding whitespace is kept and entity
//! references are decoded, so the id comparison is exact. A repeated field
//! keeps its last value.

use std::str::Utf8Error;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;

/// Posted request envelope. The root element name is not checked.
#[derive(Debug, Default)]
pub struct Post {
    pub credentials: PostCredentials,
    pub identity: PostIdentity,
}

#[derive(Debug, Default)]
pub struct PostCredentials {
    pub id: String,
    pub password: String,
}

#[derive(Debug, Default)]
pub struct PostIdentity {
    pub key: String,
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("body is not UTF-8: {0}")]
    Utf8(#[from] Utf8Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("document has no root element")]
    Empty,

    #[error("document ends inside <{0}>")]
    Truncated(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Password,
    Key,
}

impl Field {
    /// Field addressed by an element path below the root element.
    fn at(path: &[Vec<u8>]) -> Option<Self> {
        match path {
            [_, section, name] => match (section.as_slice(), name.as_slice()) {
                (b"Credentials", b"id") => Some(Field::Id),
                (b"Credentials", b"password") => Some(Field::Password),
                (b"Identity", b"key") => Some(Field::Key),
                _ => None,
            },
            _ => None,
        }
    }

    fn slot<'a>(&self, post: &'a mut Post) -> &'a mut String {
        match self {
            Field::Id => &mut post.credentials.id,
            Field::Password => &mut post.credentials.password,
            Field::Key => &mut post.identity.key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename = "Response")]
pub struct StatusDocument {
    pub status: bool,
}

impl StatusDocument {
    /// Serialize as XML indented by four spaces.
    pub fn to_xml(self) -> Result<String, String> {
        let mut buf = String::new();
        let mut ser = quick_xml::se::Serializer::new(&mut buf);
        ser.indent(' ', 4);
        self.serialize(ser).map_err(|e| e.to_string())?;
        Ok(buf)
    }
}

pub fn parse_post(body: &[u8]) -> Result<Post, EnvelopeError> {
    let text = std::str::from_utf8(body)?;
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut post = Post::default();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                seen_root = true;
                path.push(e.local_name().as_ref().to_vec());
                if let Some(field) = Field::at(&path) {
                    field.slot(&mut post).clear();
                }
            }
            Event::Empty(e) => {
                seen_root = true;
                path.push(e.local_name().as_ref().to_vec());
                if let Some(field) = Field::at(&path) {
                    field.slot(&mut post).clear();
                }
                path.pop();
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Text(t) => {
                if let Some(field) = Field::at(&path) {
                    let value = t.unescape().map_err(quick_xml::Error::from)?;
                    field.slot(&mut post).push_str(&value);
                }
            }
            Event::CData(c) => {
                if let Some(field) = Field::at(&path) {
                    field.slot(&mut post).push_str(std::str::from_utf8(&c)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = path.last() {
        return Err(EnvelopeError::Truncated(
            String::from_utf8_lossy(open).into_owned(),
        ));
    }
    if !seen_root {
        return Err(EnvelopeError::Empty);
    }
    Ok(post)
}

/// Decide the status for a raw request body.
pub fn evaluate(body: &[u8], expected_id: &str) -> StatusDocument {
    let post = parse_post(body).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to parse posted envelope");
        Post::default()
    });

    // Password is not compared.
    let status = post.credentials.id == expected_id;
    if !status {
        tracing::info!(id = %post.credentials.id, "credential id rejected");
    }
    StatusDocument { status }
}

pub async fn resp(State(config): State<Arc<Config>>, body: Bytes) -> Response {
    let document = evaluate(&body, &config.expected_id);
    match document.to_xml() {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize status document");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
