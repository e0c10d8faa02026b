use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Comparison strategy the mock server applies to an expected body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validator {
    Json,
    JsonSchema,
    Regex,
}

impl Validator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Validator::Json => "json",
            Validator::JsonSchema => "jsonschema",
            Validator::Regex => "regex",
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown validator '{0}', expected one of: json, jsonschema, regex")]
pub struct ParseValidatorError(pub String);

impl FromStr for Validator {
    type Err = ParseValidatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Validator::Json),
            "jsonschema" => Ok(Validator::JsonSchema),
            "regex" => Ok(Validator::Regex),
            _ => Err(ParseValidatorError(s.to_string())),
        }
    }
}
