use crate::mock::MockHttpSend;
use crate::{client, client_with, ACCESS_KEY};
use http::header::CONTENT_TYPE;
use http::{Method, StatusCode};
use para_client::{Client, Config, Params};
use para_core::{Context, ErrorKind, MemoryPreferenceStore};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_signed_request_carries_credential_scope() {
    let mock = MockHttpSend::default().json(json!({"id": ACCESS_KEY, "type": "app"}));
    let client = client(&mock);

    client.me(None).await.expect("me must succeed");

    let req = mock.only_request();
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.uri.to_string(), "http://localhost:8080/v1/_me");
    assert_eq!(req.headers["x-amz-date"], "20160315T120000Z");
    assert!(req.headers.get(http::header::HOST).is_none());
    assert_eq!(
        req.authorization(),
        "AWS4-HMAC-SHA256 Credential=app:para/20160315/us-east-1/para/aws4_request, \
         SignedHeaders=host;x-amz-date, \
         Signature=fd7528cad39a59043bfe804442c65ae764304a4beda2e3bf58d3363e8f6440b3"
    );
}

#[tokio::test]
async fn test_list_param_signs_first_value_and_sends_all() {
    let mock = MockHttpSend::default().json(json!([]));
    let client = client(&mock);

    client.read_all(&["a", "b"]).await.expect("read_all must succeed");

    let req = mock.only_request();
    assert_eq!(req.path_and_query(), "/v1/_batch?ids=a&ids=b");
    assert!(req.authorization().ends_with(
        "Signature=88bf6372737d88998f2408403745f87fcd82b41b427280e861f7ba1f8b13f06c"
    ));
}

#[tokio::test]
async fn test_not_found_is_absent() {
    let mock = MockHttpSend::default().status(404);
    let client = client(&mock);

    let obj = client.read(Some("dog"), "missing").await.expect("404 is not an error");
    assert!(obj.is_none());
    assert_eq!(mock.only_request().path_and_query(), "/v1/dog/missing");
}

#[tokio::test]
async fn test_error_status_is_service_rejected() {
    let mock = MockHttpSend::default().reply(
        403,
        Some("application/json"),
        r#"{"code":403,"message":"forbidden"}"#,
    );
    let client = client(&mock);

    let err = client.read(None, "1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServiceRejected);
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert!(err.to_string().contains("forbidden"));
}

#[tokio::test]
async fn test_blank_access_key_never_reaches_network() {
    let mock = MockHttpSend::default();
    let ctx = Context::new().with_http_send(mock.clone());
    let client = Client::new(ctx, Config::new("", "secret").with_endpoint(crate::ENDPOINT));

    let err = client.invoke_get("_me", &Params::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_blank_secret_sends_anonymous() {
    let mock = MockHttpSend::default();
    let client = client_with(&mock, MemoryPreferenceStore::default(), "");

    client.invoke_get("_me", &Params::new()).await.unwrap();

    let req = mock.only_request();
    assert_eq!(req.authorization(), "Anonymous app:para");
    assert!(req.headers.get("x-amz-date").is_none());
}

#[tokio::test]
async fn test_body_sets_content_type() {
    let mock = MockHttpSend::default();
    let client = client(&mock);

    let body = json!({"a": 1});
    client.invoke_put("things/1", Some(&body)).await.unwrap();
    client.invoke_delete("things/1", &Params::new()).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].headers[CONTENT_TYPE], "application/json");
    assert_eq!(requests[0].json(), body);
    assert!(requests[1].headers.get(CONTENT_TYPE).is_none());
    assert!(requests[1].body.is_empty());
}

#[tokio::test]
async fn test_reply_decoding() {
    let mock = MockHttpSend::default()
        .json(json!({"version": "1.50.0"}))
        .text("plain words")
        .reply(200, Some("application/json"), "");
    let client = client(&mock);

    let json = client.invoke_get("", &Params::new()).await.unwrap().unwrap();
    assert!(json.is_json());
    assert_eq!(json.into_raw::<Value>().unwrap(), json!({"version": "1.50.0"}));

    let text = client.invoke_get("", &Params::new()).await.unwrap().unwrap();
    assert!(!text.is_json());
    assert_eq!(text.into_raw::<Value>().unwrap(), json!("plain words"));

    let empty = client.invoke_get("", &Params::new()).await.unwrap();
    assert!(empty.is_none());
}

#[tokio::test]
async fn test_endpoint_and_api_path_are_configurable() {
    let mock = MockHttpSend::default();
    let client = client(&mock);
    client.set_endpoint("https://para.example.com/");
    client.set_api_path("/v2");

    client.invoke_get("dog", &Params::new()).await.unwrap();

    assert_eq!(
        mock.only_request().uri.to_string(),
        "https://para.example.com/v2/dog"
    );
}

#[tokio::test]
async fn test_json_content_type_ignores_case() {
    let mock = MockHttpSend::default().reply(
        200,
        Some("Application/JSON; charset=UTF-8"),
        r#"{"version":"1.50.0"}"#,
    );
    let client = client(&mock);

    let reply = client.invoke_get("", &Params::new()).await.unwrap().unwrap();
    assert!(reply.is_json());
    assert_eq!(reply.into_raw::<Value>().unwrap(), json!({"version": "1.50.0"}));
}
