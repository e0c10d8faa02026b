use thiserror::Error;

pub type Result<T> = std::result::Result<T, MockallanError>;

/// Everything a client call can fail with.
///
/// `Transport` is never produced from a status code: it is the untouched
/// reqwest error (connection refused, timeout, ...). The three
/// assertion-failure kinds are only produced by the response interpreter.
#[derive(Debug, Error)]
pub enum MockallanError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed assertion request: {0}")]
    MalformedRequest(String),

    #[error("{0}")]
    AssertionViolated(String),

    #[error("mock server error: {status} {body}")]
    ServerError { status: u16, body: String },

    #[error("invalid stub configuration: {0}")]
    InvalidConfig(String),

    #[error("unexpected response from mock server: {status} {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("invalid http method: {0}")]
    InvalidMethod(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("a request carries either a raw body or a json body, not both")]
    ConflictingBody,

    #[error("cannot encode body: {0}")]
    Encoding(String),

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl MockallanError {
    /// True for the failures a test framework should report as a failed
    /// assertion rather than as a broken test environment.
    pub fn is_assertion_failure(&self) -> bool {
        matches!(
            self,
            MockallanError::MalformedRequest(_)
                | MockallanError::AssertionViolated(_)
                | MockallanError::ServerError { .. }
        )
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, MockallanError::Transport(_))
    }
}
