use std::collections::HashMap;
use std::str::FromStr;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use crate::models::error::{MockallanError, Result};
use crate::models::request_option::RequestOption;

pub(crate) fn parse_method(method: &str) -> Result<Method> {
    Method::from_str(&method.trim().to_uppercase())
        .map_err(|_| MockallanError::InvalidMethod(method.to_string()))
}

pub(crate) fn build_headers(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut header_map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = name
            .parse::<HeaderName>()
            .map_err(|_| MockallanError::InvalidHeader(format!("name '{}'", name)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| MockallanError::InvalidHeader(format!("value for '{}'", name)))?;
        header_map.insert(header_name, header_value);
    }
    Ok(header_map)
}

/// Builds the SUT request exactly as given: `base_url + path`, no timeout,
/// no status handling.
pub(crate) fn build_request(
    client: &Client,
    base_url: &str,
    method: &str,
    path: &str,
    option: RequestOption,
) -> Result<RequestBuilder> {
    if option.data.is_some() && option.json.is_some() {
        return Err(MockallanError::ConflictingBody);
    }
    let method = parse_method(method)?;
    let url = format!("{}{}", base_url, path);
    let mut request = client.request(method, url);
    // json first so explicit headers can still override its content type
    if let Some(json) = option.json {
        request = request.json(&json);
    }
    if let Some(data) = option.data {
        request = request.body(data);
    }
    if let Some(headers) = option.headers {
        request = request.headers(build_headers(&headers)?);
    }
    Ok(request)
}
