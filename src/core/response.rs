//! Turns a control API reply into a verdict.
//!
//! Every control call funnels through [`classify`], a pure function of the
//! status code and the body text, so the mapping can be tested without a
//! server.

use serde::Deserialize;
use crate::models::error::{MockallanError, Result};

pub const GENERIC_CONFLICT: &str = "The expected call was not recorded by the mock server.";

/// Error envelope the mock server sends with 4xx replies.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    title: Option<String>,
    detail: Option<String>,
}

impl ErrorEnvelope {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn message(&self) -> Option<String> {
        match (self.title.as_deref(), self.detail.as_deref()) {
            (Some(title), Some(detail)) => Some(format!("{}. {}", title, detail)),
            (None, Some(detail)) => Some(detail.to_string()),
            (Some(title), None) => Some(title.to_string()),
            (None, None) => None,
        }
    }

    /// A conflict is only explained by its `detail`.
    fn conflict_message(&self) -> Option<String> {
        self.detail.as_ref()?;
        self.message()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// 4xx other than 409: the control request itself was wrong
    Rejected(String),
    /// 409: the recorded calls do not satisfy the assertion
    Violated(String),
    /// 5xx
    ServerFault { status: u16, body: String },
}

pub fn classify(status: u16, body: &str) -> Verdict {
    match status {
        400 => Verdict::Rejected(client_error_message(status, body)),
        409 => Verdict::Violated(
            ErrorEnvelope::parse(body)
                .conflict_message()
                .unwrap_or_else(|| GENERIC_CONFLICT.to_string()),
        ),
        401..=499 => Verdict::Rejected(client_error_message(status, body)),
        500..=599 => Verdict::ServerFault {
            status,
            body: body.to_string(),
        },
        _ => Verdict::Accepted,
    }
}

fn client_error_message(status: u16, body: &str) -> String {
    ErrorEnvelope::parse(body)
        .message()
        .unwrap_or_else(|| format!("{} {}", status, body).trim_end().to_string())
}

impl Verdict {
    /// Outcome of an assertion call.
    pub fn into_assertion(self) -> Result<()> {
        match self {
            Verdict::Accepted => Ok(()),
            Verdict::Rejected(message) => Err(MockallanError::MalformedRequest(message)),
            Verdict::Violated(message) => Err(MockallanError::AssertionViolated(message)),
            Verdict::ServerFault { status, body } => Err(MockallanError::ServerError { status, body }),
        }
    }

    /// Outcome of a `/config` call: any client-side rejection means the stub
    /// configuration was refused.
    pub fn into_config(self) -> Result<()> {
        match self {
            Verdict::Rejected(message) | Verdict::Violated(message) => {
                Err(MockallanError::InvalidConfig(message))
            }
            other => other.into_assertion(),
        }
    }
}
