//! A small in-process stand-in for mockallan built on wiremock.
//!
//! Every request that is not a control call is recorded; the control
//! endpoints answer from that record the way mockallan does.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

type Calls = Arc<Mutex<Vec<RecordedCall>>>;

pub struct MockallanDouble {
    pub server: MockServer,
    calls: Calls,
}

impl MockallanDouble {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));

        for (verb, endpoint, kind) in [
            ("GET", "/assert-called", AssertKind::Called),
            ("GET", "/assert-called-once", AssertKind::CalledOnce),
            ("POST", "/assert-called-with", AssertKind::CalledWith),
            ("POST", "/assert-called-once-with", AssertKind::CalledOnceWith),
        ] {
            Mock::given(method(verb))
                .and(path(endpoint))
                .respond_with(AssertResponder { calls: calls.clone(), kind })
                .with_priority(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/call-count"))
            .respond_with(HistoryResponder { calls: calls.clone(), kind: HistoryKind::Count })
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/call-args"))
            .respond_with(HistoryResponder { calls: calls.clone(), kind: HistoryKind::Last })
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/call-args-list"))
            .respond_with(HistoryResponder { calls: calls.clone(), kind: HistoryKind::All })
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/config"))
            .respond_with(ConfigResponder)
            .with_priority(1)
            .mount(&server)
            .await;
        // everything else is a SUT call
        Mock::given(wiremock::matchers::any())
            .respond_with(Recorder { calls: calls.clone() })
            .with_priority(10)
            .mount(&server)
            .await;

        MockallanDouble { server, calls }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

fn conflict(detail: String) -> ResponseTemplate {
    ResponseTemplate::new(409).set_body_json(json!({
        "status": 409,
        "title": "Assertion request error",
        "detail": detail,
    }))
}

fn query(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn content_type(request: &Request) -> Option<String> {
    request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

struct Recorder {
    calls: Calls,
}

impl Respond for Recorder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.calls.lock().unwrap().push(RecordedCall {
            method: request.method.to_string(),
            path: request.url.path().to_string(),
            body: request.body.clone(),
        });
        ResponseTemplate::new(200).set_body_json(json!({"status": "recorded"}))
    }
}

#[derive(Clone, Copy)]
enum AssertKind {
    Called,
    CalledOnce,
    CalledWith,
    CalledOnceWith,
}

struct AssertResponder {
    calls: Calls,
    kind: AssertKind,
}

impl AssertResponder {
    fn body_matches(&self, request: &Request, recorded: &[u8]) -> bool {
        match content_type(request).as_deref() {
            Some("application/json") => {
                let expected: Option<Value> = serde_json::from_slice(&request.body).ok();
                let actual: Option<Value> = serde_json::from_slice(recorded).ok();
                expected.is_some() && expected == actual
            }
            _ => request.body == recorded,
        }
    }
}

impl Respond for AssertResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let (Some(verb), Some(target)) = (query(request, "method"), query(request, "path")) else {
            return ResponseTemplate::new(400).set_body_json(json!({
                "title": "Bad Request",
                "detail": "'method' and 'path' query parameters are required.",
            }));
        };
        let calls = self.calls.lock().unwrap();
        let matching: Vec<&RecordedCall> = calls
            .iter()
            .filter(|c| c.method == verb && c.path == target)
            .collect();
        let with_body: Vec<&&RecordedCall> = matching
            .iter()
            .filter(|c| self.body_matches(request, &c.body))
            .collect();
        let ok = match self.kind {
            AssertKind::Called => !matching.is_empty(),
            AssertKind::CalledOnce => matching.len() == 1,
            AssertKind::CalledWith => !with_body.is_empty(),
            AssertKind::CalledOnceWith => matching.len() == 1 && with_body.len() == 1,
        };
        if ok {
            ResponseTemplate::new(200).set_body_json(json!({"status": 200, "title": "OK"}))
        } else {
            conflict(format!(
                "Expected {} {} to be called as asserted. Called {} times.",
                verb,
                target,
                matching.len()
            ))
        }
    }
}

#[derive(Clone, Copy)]
enum HistoryKind {
    Count,
    Last,
    All,
}

struct HistoryResponder {
    calls: Calls,
    kind: HistoryKind,
}

impl Respond for HistoryResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let calls = self.calls.lock().unwrap();
        match self.kind {
            HistoryKind::Count => ResponseTemplate::new(200).set_body_json(json!({"count": calls.len()})),
            HistoryKind::Last => match calls.last() {
                None => conflict("Expected mock to have been called.".to_string()),
                Some(call) => match serde_json::from_slice::<Value>(&call.body) {
                    Ok(value) => ResponseTemplate::new(200).set_body_json(value),
                    Err(_) => ResponseTemplate::new(200)
                        .set_body_string(String::from_utf8_lossy(&call.body).into_owned()),
                },
            },
            HistoryKind::All => ResponseTemplate::new(200).set_body_json(
                calls
                    .iter()
                    .map(|c| json!({"method": c.method, "path": c.path}))
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

struct ConfigResponder;

impl Respond for ConfigResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match serde_json::from_slice::<Value>(&request.body) {
            Ok(Value::Object(config)) if config.contains_key("endpoints") => {
                ResponseTemplate::new(204)
            }
            _ => ResponseTemplate::new(400).set_body_json(json!({
                "status": 400,
                "title": "Invalid JSON configuration",
                "detail": "'endpoints' is a required property",
            })),
        }
    }
}
