//! cstore operations against a recording mock transport.

mod common;

use common::{client, client_with, json_response, MockTransport, CSTORE_URL};
use edge_sdk::http::Method;
use edge_sdk::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_get_status() {
    let mock = MockTransport::new();
    mock.respond_result(json!({"keys": ["alpha", "beta"]}));
    let client = client(&mock);

    let status = client.cstore().get_status().await.unwrap();
    assert_eq!(status.keys, vec!["alpha".to_string(), "beta".to_string()]);

    let requests = mock.requests();
    assert_eq!(requests[0].url, format!("{}/get_status", CSTORE_URL));
    assert_eq!(requests[0].method, Method::Get);
}

#[tokio::test]
async fn test_set_value_stringifies_and_attaches_peers() {
    let mock = MockTransport::new();
    mock.respond_result(json!(true));
    mock.respond_result(json!(true));
    let client = client_with(&mock, MultipartKind::Streaming, &["peer-1", "peer-2"]);

    let ok = client
        .cstore()
        .set_value(&SetValueRequest::new("counter", 42i64))
        .await
        .unwrap();
    assert!(ok);

    client
        .cstore()
        .set_value(&SetValueRequest::new("obj", json!({"a": [1, 2]})))
        .await
        .unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].url, format!("{}/set", CSTORE_URL));
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].headers["content-type"], "application/json");
    assert_eq!(
        requests[0].json(),
        &json!({"key": "counter", "value": "42", "chainstore_peers": ["peer-1", "peer-2"]})
    );
    assert_eq!(requests[1].json()["value"], json!(r#"{"a":[1,2]}"#));
}

#[tokio::test]
async fn test_float_values_use_plain_string_form() {
    let mock = MockTransport::new();
    mock.respond_result(json!(true));
    mock.respond_result(json!(true));
    let client = client(&mock);

    client
        .cstore()
        .set_value(&SetValueRequest::new("ratio", 1.0))
        .await
        .unwrap();
    // non-finite floats are values, not missing ones
    client
        .cstore()
        .hset(&HSetRequest::new("h", "k", f64::NAN))
        .await
        .unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].json()["value"], json!("1"));
    assert_eq!(requests[1].json()["value"], json!("NaN"));
}

#[tokio::test]
async fn test_unconfigured_peers_sent_as_empty_list() {
    let mock = MockTransport::new();
    mock.respond_result(json!(true));
    let client = client(&mock);

    client
        .cstore()
        .hset(&HSetRequest::new("users", "u1", "active"))
        .await
        .unwrap();

    assert_eq!(
        mock.requests()[0].json(),
        &json!({"hkey": "users", "key": "u1", "value": "active", "chainstore_peers": []})
    );
}

#[tokio::test]
async fn test_get_value_query_and_null_result() {
    let mock = MockTransport::new();
    mock.respond_result(json!("hello"));
    mock.respond_result(json!(null));
    let client = client(&mock);

    let hit = client
        .cstore()
        .get_value(&GetValueRequest::new("my key&more"))
        .await
        .unwrap();
    assert_eq!(hit.as_deref(), Some("hello"));

    let miss = client
        .cstore()
        .get_value(&GetValueRequest::new("absent"))
        .await
        .unwrap();
    assert_eq!(miss, None);

    assert_eq!(
        mock.requests()[0].url,
        format!("{}/get?key=my+key%26more", CSTORE_URL)
    );
}

#[tokio::test]
async fn test_hget_query() {
    let mock = MockTransport::new();
    mock.respond_result(json!("v"));
    let client = client(&mock);

    let value = client
        .cstore()
        .hget(&HGetRequest::new("h", "k"))
        .await
        .unwrap();
    assert_eq!(value.as_deref(), Some("v"));
    assert_eq!(mock.requests()[0].url, format!("{}/hget?hkey=h&key=k", CSTORE_URL));
}

#[tokio::test]
async fn test_hgetall_empty_and_null_are_empty_maps() {
    let mock = MockTransport::new();
    mock.respond_result(json!({}));
    mock.respond_result(json!(null));
    mock.respond_result(json!({"a": "1", "b": "2"}));
    let client = client(&mock);
    let req = HGetAllRequest::new("hash");

    assert!(client.cstore().hgetall(&req).await.unwrap().is_empty());
    let full = client.cstore().hgetall_full(&req).await.unwrap();
    assert!(full.result.is_empty());
    assert_eq!(full.node_alias, "mock-edge");

    let all = client.cstore().hgetall(&req).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all["b"], "2");
}

#[tokio::test]
async fn test_full_envelope_matches_result_only() {
    let mock = MockTransport::new();
    mock.respond_result(json!(true));
    mock.respond_result(json!(true));
    let client = client(&mock);
    let req = SetValueRequest::new("k", "v");

    let full = client.cstore().set_value_full(&req).await.unwrap();
    let only = client.cstore().set_value(&req).await.unwrap();
    assert_eq!(full.result, only);
    assert_eq!(full.server_node_addr, "0xai_mock_node");
    assert_eq!(full.node_version, "2.0.0");
    assert_eq!(full.extra["server_time"], json!("2025-06-01 12:00:00"));

    let generic = {
        mock.respond_result(json!(true));
        client.cstore().set_value_as::<FullEnvelope>(&req).await.unwrap()
    };
    assert_eq!(generic.evm_network, "devnet");
}

#[tokio::test]
async fn test_validation_fails_before_any_request() {
    let mock = MockTransport::new();
    let client = client(&mock);
    let cstore = client.cstore();

    let cases = vec![
        (
            cstore.set_value(&SetValueRequest::new("", "v")).await.unwrap_err(),
            "key is required",
        ),
        (
            cstore
                .set_value(&SetValueRequest::new("k", serde_json::Value::Null))
                .await
                .unwrap_err(),
            "value is required",
        ),
        (
            cstore.get_value(&GetValueRequest::new("")).await.unwrap_err(),
            "key is required",
        ),
        (
            cstore.hset(&HSetRequest::new("", "k", "v")).await.unwrap_err(),
            "hkey is required",
        ),
        (
            cstore.hset(&HSetRequest::new("h", "", "v")).await.unwrap_err(),
            "key is required",
        ),
        (
            cstore.hget(&HGetRequest::new("h", "")).await.unwrap_err(),
            "key is required",
        ),
        (
            cstore.hgetall(&HGetAllRequest::new("")).await.unwrap_err(),
            "hkey is required",
        ),
    ];

    for (err, expected) in cases {
        assert!(
            matches!(err, SdkError::Validation(ref m) if m == expected),
            "got {:?}, expected {}",
            err,
            expected
        );
    }
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_error_status_attaches_response() {
    let mock = MockTransport::new();
    mock.respond(json_response(500, json!({"error": "boom"})));
    let client = client(&mock);

    let err = client
        .cstore()
        .get_value(&GetValueRequest::new("k"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP error: Request failed with status 500");
    let response = err.response().expect("response attached");
    assert_eq!(response.status, 500);
    assert!(response.text().contains("boom"));
}

#[tokio::test]
async fn test_malformed_json_is_reported() {
    let mock = MockTransport::new();
    let mut broken = json_response(200, json!({}));
    broken.body = bytes::Bytes::from_static(b"{\"result\": tru");
    mock.respond(broken);
    let client = client(&mock);

    let err = client.cstore().get_status().await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::Http(HttpError::MalformedResponse { status: 200, .. })
    ));
}

#[tokio::test]
async fn test_transport_failure_surfaces() {
    let mock = MockTransport::new();
    let client = client(&mock);

    let err = client.cstore().get_status().await.unwrap_err();
    assert!(matches!(err, SdkError::Http(HttpError::Transport(_))));
    assert_eq!(mock.request_count(), 1);
}
