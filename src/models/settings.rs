use std::env;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::models::error::{MockallanError, Result};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_SECS: f64 = 20.0;

pub const BASE_URL_ENV: &str = "MOCKALLAN_BASE_URL";
pub const TIMEOUT_ENV: &str = "MOCKALLAN_TIMEOUT";

/// Where the mock server lives and how long a control request may take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
}

fn default_timeout_secs() -> f64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientSettings {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: f64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Defaults overridden by `MOCKALLAN_BASE_URL` and `MOCKALLAN_TIMEOUT`.
    pub fn from_env() -> Result<Self> {
        let mut settings = ClientSettings::default();
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            settings.base_url = base_url;
        }
        if let Ok(timeout) = env::var(TIMEOUT_ENV) {
            settings.timeout_secs = timeout.trim().parse().map_err(|_| {
                MockallanError::InvalidSetting(format!("{}={}", TIMEOUT_ENV, timeout))
            })?;
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.normalized_base_url().is_empty() {
            return Err(MockallanError::InvalidSetting("base_url must not be empty".into()));
        }
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(MockallanError::InvalidSetting(format!(
                "timeout_secs must be a positive number of seconds, got {}",
                self.timeout_secs
            )));
        }
        Ok(())
    }

    /// Base URL without trailing slashes so that `base + "/path"` stays clean.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }
}
