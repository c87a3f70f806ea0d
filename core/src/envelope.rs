//! Textual envelope templates.
//!
//! A template is literal XML with `{{.Field}}` actions. The recognised fields
//! are `ID`, `Password` and `Key`. Substituted values are XML-escaped; the
//! literal text is emitted untouched.

use quick_xml::escape::escape;

use crate::error::ApiError;
use crate::types::SoapRequest;

/// The envelope sent to the validator.
pub const DEFAULT_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Request>
    <Credentials>
        <id>{{.ID}}</id>
        <password>{{.Password}}</password>
    </Credentials>
    <Identity>
        <key>{{.Key}}</key>
    </Identity>
</Request>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Password,
    Key,
}

impl Field {
    fn from_action(action: &str) -> Result<Self, ApiError> {
        let name = action
            .strip_prefix('.')
            .ok_or_else(|| ApiError::Template(format!("unsupported action {{{{{action}}}}}")))?;
        match name {
            "ID" => Ok(Field::Id),
            "Password" => Ok(Field::Password),
            "Key" => Ok(Field::Key),
            other => Err(ApiError::Template(format!("unknown field {other:?}"))),
        }
    }

    fn value<'a>(&self, request: &'a SoapRequest) -> &'a str {
        match self {
            Field::Id => &request.credentials.id,
            Field::Password => &request.credentials.password,
            Field::Key => &request.identity.key,
        }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Text(String),
    Field(Field),
}

/// A parsed envelope template, ready to render any number of requests.
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, ApiError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| {
                let offset = source.len() - rest.len() + start;
                ApiError::Template(format!("unclosed action at byte {offset}"))
            })?;
            segments.push(Segment::Field(Field::from_action(after[..end].trim())?));
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }

    pub fn render(&self, request: &SoapRequest) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(&escape(field.value(request))),
            }
        }
        out
    }
}

/// Render `request` into the default envelope.
pub fn render_envelope(request: &SoapRequest) -> Result<String, ApiError> {
    let template = Template::parse(DEFAULT_TEMPLATE).inspect_err(|e| {
        tracing::error!(error = %e, "failed to parse envelope template");
    })?;
    Ok(template.render(request))
}
