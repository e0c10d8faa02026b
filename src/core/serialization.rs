//! Picks how an expected body goes over the wire.
//!
//! Two selectors feed one decision: an explicit `Content-Type` and a
//! [`Validator`]. The rules live in [`PRECEDENCE`] and are tried top to
//! bottom, so every content-type rule is consulted before any validator rule.

use crate::models::body::{Body, ExpectedBody};
use crate::models::error::{MockallanError, Result};
use crate::models::validator::Validator;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_JSONSCHEMA: &str = "application/jsonschema";
pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_XML: &str = "application/xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    ContentType(&'static str),
    Validator(Validator),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// serde_json encoding, labelled with the given content type
    Json(&'static str),
    /// literal payload bytes, labelled with the given content type
    Raw(&'static str),
    /// literal payload bytes, no content type header
    TransportDefault,
}

impl Strategy {
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Strategy::Json(content_type) | Strategy::Raw(content_type) => Some(*content_type),
            Strategy::TransportDefault => None,
        }
    }
}

pub const PRECEDENCE: &[(Selector, Strategy)] = &[
    (Selector::ContentType(APPLICATION_JSON), Strategy::Json(APPLICATION_JSON)),
    (Selector::ContentType(APPLICATION_JSONSCHEMA), Strategy::Json(APPLICATION_JSONSCHEMA)),
    (Selector::ContentType(TEXT_PLAIN), Strategy::Raw(TEXT_PLAIN)),
    (Selector::ContentType(APPLICATION_XML), Strategy::Raw(APPLICATION_XML)),
    (Selector::Validator(Validator::Json), Strategy::Json(APPLICATION_JSON)),
    (Selector::Validator(Validator::JsonSchema), Strategy::Json(APPLICATION_JSONSCHEMA)),
    (Selector::Validator(Validator::Regex), Strategy::Raw(TEXT_PLAIN)),
];

/// Media type essence: parameters dropped, lowercased, trimmed.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

pub fn resolve(content_type: Option<&str>, validator: Option<Validator>) -> Strategy {
    let declared = content_type.map(essence).filter(|ct| !ct.is_empty());

    let strategy = PRECEDENCE
        .iter()
        .find(|(selector, _)| match selector {
            Selector::ContentType(ct) => declared.as_deref() == Some(*ct),
            Selector::Validator(v) => validator == Some(*v),
        })
        .map(|(_, strategy)| *strategy)
        .unwrap_or(Strategy::TransportDefault);

    if let Some(ct) = declared.as_deref() {
        if !matches_rule(ct) {
            tracing::warn!("content type '{}' selects no serialization, ignoring it", ct);
        }
    }
    strategy
}

fn matches_rule(content_type: &str) -> bool {
    PRECEDENCE
        .iter()
        .any(|(selector, _)| matches!(selector, Selector::ContentType(ct) if *ct == content_type))
}

/// Bytes plus the header value to send with them.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

pub fn encode(strategy: Strategy, payload: &Body) -> Result<EncodedBody> {
    let bytes = match strategy {
        Strategy::Json(_) => match payload {
            Body::Json(value) => serde_json::to_vec(value),
            Body::Text(text) => serde_json::to_vec(text),
            Body::Bytes(bytes) => serde_json::from_slice::<serde_json::Value>(bytes)
                .and_then(|value| serde_json::to_vec(&value)),
        }
        .map_err(|e| MockallanError::Encoding(e.to_string()))?,
        Strategy::Raw(_) | Strategy::TransportDefault => payload.to_literal_bytes(),
    };
    Ok(EncodedBody {
        bytes,
        content_type: strategy.content_type().map(str::to_string),
    })
}

/// Encodes the expected body. When the declared content type picked the
/// strategy, it is sent as declared, parameters included.
pub fn encode_expected(expected: &ExpectedBody) -> Result<EncodedBody> {
    let declared = expected.content_type.as_deref();
    let strategy = resolve(declared, expected.validator);
    let mut encoded = encode(strategy, &expected.payload)?;
    if let Some(declared) = declared {
        if matches_rule(&essence(declared)) {
            encoded.content_type = Some(declared.trim().to_string());
        }
    }
    Ok(encoded)
}
