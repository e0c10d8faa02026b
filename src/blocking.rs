//! Synchronous facade for plain `#[test]` functions.
//!
//! Each call drives the async client to completion on a private
//! current-thread runtime. Do not call these methods from inside an async
//! context: tokio refuses to block a runtime thread.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};
use crate::core::client::MockallanClient as AsyncClient;
use crate::models::body::{Body, ExpectedBody};
use crate::models::error::{MockallanError, Result};
use crate::models::request_option::RequestOption;
use crate::models::settings::ClientSettings;

/// Fully read response of a pass-through request.
#[derive(Debug, Clone)]
pub struct PassThroughResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl PassThroughResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| MockallanError::Encoding(e.to_string()))
    }
}

#[derive(Debug)]
pub struct MockallanClient {
    inner: AsyncClient,
    runtime: Runtime,
}

impl MockallanClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_settings(ClientSettings::new(base_url))
    }

    pub fn with_settings(settings: ClientSettings) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let inner = AsyncClient::with_settings(settings)?;
        Ok(MockallanClient { inner, runtime })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    pub fn request(&self, method: &str, path: &str, option: RequestOption) -> Result<PassThroughResponse> {
        self.runtime.block_on(async {
            let response = self.inner.request(method, path, option).await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();
            Ok(PassThroughResponse { status, headers, body })
        })
    }

    pub fn get(&self, path: &str, option: RequestOption) -> Result<PassThroughResponse> {
        self.request("GET", path, option)
    }

    pub fn post(&self, path: &str, option: RequestOption) -> Result<PassThroughResponse> {
        self.request("POST", path, option)
    }

    pub fn put(&self, path: &str, option: RequestOption) -> Result<PassThroughResponse> {
        self.request("PUT", path, option)
    }

    pub fn patch(&self, path: &str, option: RequestOption) -> Result<PassThroughResponse> {
        self.request("PATCH", path, option)
    }

    pub fn assert_called(&self, method: &str, path: &str) -> Result<()> {
        self.runtime.block_on(self.inner.assert_called(method, path))
    }

    pub fn assert_called_once(&self, method: &str, path: &str) -> Result<()> {
        self.runtime.block_on(self.inner.assert_called_once(method, path))
    }

    pub fn assert_called_with(&self, method: &str, path: &str, expected: impl Into<ExpectedBody>) -> Result<()> {
        self.runtime.block_on(self.inner.assert_called_with(method, path, expected))
    }

    pub fn assert_called_once_with(&self, method: &str, path: &str, expected: impl Into<ExpectedBody>) -> Result<()> {
        self.runtime.block_on(self.inner.assert_called_once_with(method, path, expected))
    }

    pub fn configure<T: Serialize + ?Sized>(&self, config: &T) -> Result<()> {
        self.runtime.block_on(self.inner.configure(config))
    }

    pub fn call_args(&self) -> Result<Body> {
        self.runtime.block_on(self.inner.call_args())
    }

    pub fn call_args_list(&self) -> Result<Vec<Value>> {
        self.runtime.block_on(self.inner.call_args_list())
    }

    pub fn call_count(&self) -> Result<u64> {
        self.runtime.block_on(self.inner.call_count())
    }
}
