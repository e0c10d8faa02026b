mod support;

use mockallan_client::{Body, MockallanClient, MockallanError, RequestOption};
use serde_json::json;
use support::MockallanDouble;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn call_history_follows_sut_calls() {
    let mockallan = MockallanDouble::start().await;
    let client = MockallanClient::new(mockallan.uri()).unwrap();

    assert_eq!(client.call_count().await.unwrap(), 0);
    assert!(client.call_args_list().await.unwrap().is_empty());

    client.post("/orders", RequestOption::json(json!({"id": 1}))).await.unwrap();
    client.post("/orders", RequestOption::json(json!({"id": 2}))).await.unwrap();

    assert_eq!(client.call_count().await.unwrap(), 2);
    assert_eq!(client.call_args().await.unwrap(), Body::Json(json!({"id": 2})));
    assert_eq!(
        client.call_args_list().await.unwrap(),
        vec![
            json!({"method": "POST", "path": "/orders"}),
            json!({"method": "POST", "path": "/orders"}),
        ]
    );
    assert_eq!(mockallan.calls().len(), 2);
}

#[tokio::test]
async fn call_args_before_any_call_is_a_violation() {
    let mockallan = MockallanDouble::start().await;
    let client = MockallanClient::new(mockallan.uri()).unwrap();

    let err = client.call_args().await.unwrap_err();
    assert!(matches!(err, MockallanError::AssertionViolated(ref m) if m.contains("Expected mock to have been called")));
}

#[tokio::test]
async fn call_args_returns_text_bodies_as_text() {
    let mockallan = MockallanDouble::start().await;
    let client = MockallanClient::new(mockallan.uri()).unwrap();

    client.post("/notes", RequestOption::data("hello there")).await.unwrap();

    assert_eq!(client.call_args().await.unwrap(), Body::Text("hello there".into()));
}

#[tokio::test]
async fn call_count_accepts_bare_integer_and_rejects_garbage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/call-count"))
        .respond_with(ResponseTemplate::new(200).set_body_string("7"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/call-count"))
        .respond_with(ResponseTemplate::new(200).set_body_string("seven"))
        .mount(&server)
        .await;
    let client = MockallanClient::new(server.uri()).unwrap();

    assert_eq!(client.call_count().await.unwrap(), 7);
    let err = client.call_count().await.unwrap_err();
    assert!(matches!(err, MockallanError::UnexpectedResponse { status: 200, ref body } if body == "seven"));
}

#[tokio::test]
async fn call_args_list_non_ok_success_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/call-args-list"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let client = MockallanClient::new(server.uri()).unwrap();

    assert!(client.call_args_list().await.unwrap().is_empty());
}

#[tokio::test]
async fn call_args_list_server_error_is_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/call-args-list"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;
    let client = MockallanClient::new(server.uri()).unwrap();

    let err = client.call_args_list().await.unwrap_err();
    assert!(matches!(err, MockallanError::ServerError { status: 502, .. }));
}

#[tokio::test]
async fn valid_config_is_accepted() {
    let mockallan = MockallanDouble::start().await;
    let client = MockallanClient::new(mockallan.uri()).unwrap();

    client
        .configure(&json!({
            "endpoints": [{
                "request": {"method": "GET", "endpoint": "/orders"},
                "response": {"code": "200", "body": {"orders": []}},
            }]
        }))
        .await
        .unwrap();
}

#[tokio::test]
async fn invalid_config_is_distinguishable() {
    let mockallan = MockallanDouble::start().await;
    let client = MockallanClient::new(mockallan.uri()).unwrap();

    let err = client.configure(&json!({"default": {}})).await.unwrap_err();

    assert!(!err.is_assertion_failure());
    match err {
        MockallanError::InvalidConfig(message) => {
            assert_eq!(message, "Invalid JSON configuration. 'endpoints' is a required property");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn config_is_put_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/config"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"endpoints": []})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let client = MockallanClient::new(server.uri()).unwrap();

    client.configure(&json!({"endpoints": []})).await.unwrap();
}
