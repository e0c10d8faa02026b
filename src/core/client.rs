use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use crate::core::forward;
use crate::core::response::{classify, Verdict};
use crate::core::serialization::encode_expected;
use crate::core::user_agent::user_agent;
use crate::models::body::{Body, ExpectedBody};
use crate::models::error::{MockallanError, Result};
use crate::models::request_option::RequestOption;
use crate::models::settings::ClientSettings;

/// Client for one mockallan instance.
///
/// Cheap to clone and safe to share between tasks: it only holds read-only
/// settings and two reqwest clients, one bounded by the configured timeout for
/// control calls and one unbounded for pass-through calls.
#[derive(Debug, Clone)]
pub struct MockallanClient {
    base_url: String,
    settings: ClientSettings,
    control: Client,
    passthrough: Client,
}

impl MockallanClient {
    /// Client with the default 20 second control timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_settings(ClientSettings::new(base_url))
    }

    pub fn with_settings(settings: ClientSettings) -> Result<Self> {
        settings.validate()?;
        let control = Client::builder()
            .timeout(settings.timeout())
            .user_agent(user_agent())
            .build()?;
        let passthrough = Client::builder().build()?;
        Ok(MockallanClient {
            base_url: settings.normalized_base_url().to_string(),
            settings,
            control,
            passthrough,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Sends a request on behalf of the SUT to `base_url + path` and returns
    /// the raw response without looking at its status.
    pub async fn request(&self, method: &str, path: &str, option: RequestOption) -> Result<Response> {
        let request = forward::build_request(&self.passthrough, &self.base_url, method, path, option)?;
        tracing::debug!("pass-through {} {}", method, path);
        Ok(request.send().await?)
    }

    pub async fn get(&self, path: &str, option: RequestOption) -> Result<Response> {
        self.request("GET", path, option).await
    }

    pub async fn post(&self, path: &str, option: RequestOption) -> Result<Response> {
        self.request("POST", path, option).await
    }

    pub async fn put(&self, path: &str, option: RequestOption) -> Result<Response> {
        self.request("PUT", path, option).await
    }

    pub async fn patch(&self, path: &str, option: RequestOption) -> Result<Response> {
        self.request("PATCH", path, option).await
    }

    /// Passes if the mock server recorded at least one `method path` call.
    pub async fn assert_called(&self, method: &str, path: &str) -> Result<()> {
        self.assert_call_occurred("/assert-called", method, path).await
    }

    /// Passes if the mock server recorded exactly one `method path` call.
    pub async fn assert_called_once(&self, method: &str, path: &str) -> Result<()> {
        self.assert_call_occurred("/assert-called-once", method, path).await
    }

    /// Passes if a `method path` call carried a body matching `expected`.
    ///
    /// ```no_run
    /// # async fn demo() -> mockallan_client::Result<()> {
    /// use mockallan_client::{ExpectedBody, MockallanClient, Validator};
    ///
    /// let client = MockallanClient::new("http://127.0.0.1:8080")?;
    /// client
    ///     .assert_called_with(
    ///         "POST",
    ///         "/orders/order_9b3e",
    ///         ExpectedBody::new(r#"\{"foo": ".*"\}"#).validator(Validator::Regex),
    ///     )
    ///     .await
    /// # }
    /// ```
    pub async fn assert_called_with(&self, method: &str, path: &str, expected: impl Into<ExpectedBody>) -> Result<()> {
        self.assert_call_with_body("/assert-called-with", method, path, expected.into()).await
    }

    /// Like [`assert_called_with`](Self::assert_called_with) but the call must
    /// have happened exactly once.
    pub async fn assert_called_once_with(
        &self,
        method: &str,
        path: &str,
        expected: impl Into<ExpectedBody>,
    ) -> Result<()> {
        self.assert_call_with_body("/assert-called-once-with", method, path, expected.into()).await
    }

    async fn assert_call_occurred(&self, endpoint: &str, method: &str, path: &str) -> Result<()> {
        let response = self
            .control
            .get(self.control_url(endpoint))
            .query(&[("method", method), ("path", path)])
            .send()
            .await?;
        let verdict = read_verdict(endpoint, response).await?;
        verdict.into_assertion()
    }

    async fn assert_call_with_body(&self, endpoint: &str, method: &str, path: &str, expected: ExpectedBody) -> Result<()> {
        let encoded = encode_expected(&expected)?;
        let mut request = self
            .control
            .post(self.control_url(endpoint))
            .query(&[("method", method), ("path", path)]);
        if let Some(content_type) = encoded.content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        let response = request.body(encoded.bytes).send().await?;
        let verdict = read_verdict(endpoint, response).await?;
        verdict.into_assertion()
    }

    /// Replaces the mock server's stub configuration.
    pub async fn configure<T: Serialize + ?Sized>(&self, config: &T) -> Result<()> {
        let body = serde_json::to_vec(config).map_err(|e| MockallanError::Encoding(e.to_string()))?;
        let response = self
            .control
            .put(self.control_url("/config"))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let verdict = read_verdict("/config", response).await?;
        verdict.into_config()
    }

    /// Body of the last recorded call. Fails with an assertion violation when
    /// the mock was never called.
    pub async fn call_args(&self) -> Result<Body> {
        let response = self.control.get(self.control_url("/call-args")).send().await?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.to_ascii_lowercase().contains("json"))
            .unwrap_or(false);
        let text = response.text().await?;
        classify_logged("/call-args", status, &text).into_assertion()?;
        if is_json {
            if let Ok(value) = serde_json::from_str::<Value>(&text) {
                return Ok(Body::Json(value));
            }
        }
        Ok(Body::Text(text))
    }

    /// Every recorded call, oldest first.
    pub async fn call_args_list(&self) -> Result<Vec<Value>> {
        let response = self.control.get(self.control_url("/call-args-list")).send().await?;
        let status = response.status();
        let text = response.text().await?;
        classify_logged("/call-args-list", status, &text).into_assertion()?;
        if status != StatusCode::OK {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|_| MockallanError::UnexpectedResponse {
            status: status.as_u16(),
            body: text,
        })
    }

    /// Number of calls the mock server recorded.
    pub async fn call_count(&self) -> Result<u64> {
        let response = self.control.get(self.control_url("/call-count")).send().await?;
        let status = response.status();
        let text = response.text().await?;
        classify_logged("/call-count", status, &text).into_assertion()?;
        if status == StatusCode::OK {
            if let Some(count) = parse_count(&text) {
                return Ok(count);
            }
        }
        Err(MockallanError::UnexpectedResponse {
            status: status.as_u16(),
            body: text,
        })
    }

    fn control_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

async fn read_verdict(endpoint: &str, response: Response) -> Result<Verdict> {
    let status = response.status();
    let text = response.text().await?;
    Ok(classify_logged(endpoint, status, &text))
}

fn classify_logged(endpoint: &str, status: StatusCode, text: &str) -> Verdict {
    let verdict = classify(status.as_u16(), text);
    tracing::debug!("{} -> {} ({:?})", endpoint, status.as_u16(), verdict);
    verdict
}

/// Accepts `3` as well as `{"count": 3}`.
fn parse_count(text: &str) -> Option<u64> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Number(n) => n.as_u64(),
        Value::Object(map) => map.get("count").and_then(Value::as_u64),
        _ => None,
    }
}
