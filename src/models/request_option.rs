use std::collections::HashMap;
use serde_json::Value;

/// What the SUT puts on a pass-through request.
#[derive(Debug, Clone, Default)]
pub struct RequestOption {
    // sent as-is
    pub data: Option<Vec<u8>>,
    pub json: Option<Value>,
    pub headers: Option<HashMap<String, String>>,
}

impl RequestOption {
    pub fn json(value: Value) -> Self {
        RequestOption {
            json: Some(value),
            ..Default::default()
        }
    }

    pub fn data(data: impl Into<Vec<u8>>) -> Self {
        RequestOption {
            data: Some(data.into()),
            ..Default::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }
}
