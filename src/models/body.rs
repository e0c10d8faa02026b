use serde_json::Value;
use crate::models::validator::Validator;

/// A request body as the test author wrote it.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
    Bytes(Vec<u8>),
}

impl Body {
    /// The literal bytes of the payload. A JSON string is sent unquoted,
    /// any other JSON value as compact JSON text.
    pub fn to_literal_bytes(&self) -> Vec<u8> {
        match self {
            Body::Json(Value::String(s)) => s.clone().into_bytes(),
            Body::Json(value) => value.to_string().into_bytes(),
            Body::Text(text) => text.clone().into_bytes(),
            Body::Bytes(bytes) => bytes.clone(),
        }
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Bytes(bytes.to_vec())
    }
}

/// Body a `called-with` assertion expects, plus the two selectors that
/// decide how it goes over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedBody {
    pub payload: Body,
    pub content_type: Option<String>,
    pub validator: Option<Validator>,
}

impl ExpectedBody {
    pub fn new(payload: impl Into<Body>) -> Self {
        ExpectedBody {
            payload: payload.into(),
            content_type: None,
            validator: None,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }
}

impl From<Body> for ExpectedBody {
    fn from(payload: Body) -> Self {
        ExpectedBody::new(payload)
    }
}

impl From<Value> for ExpectedBody {
    fn from(payload: Value) -> Self {
        ExpectedBody::new(payload)
    }
}

impl From<&str> for ExpectedBody {
    fn from(payload: &str) -> Self {
        ExpectedBody::new(payload)
    }
}

impl From<String> for ExpectedBody {
    fn from(payload: String) -> Self {
        ExpectedBody::new(payload)
    }
}
