use crate::mock::MockHttpSend;
use crate::{client, client_with, SECRET_KEY};
use http::Method;
use para_client::{Params, TokenStatus, TOKEN_EXPIRES_KEY, TOKEN_KEY, TOKEN_NEXT_REFRESH_KEY};
use para_core::hash::base64_url_encode;
use para_core::time::now_millis;
use para_core::{ErrorKind, MemoryPreferenceStore};
use pretty_assertions::assert_eq;
use serde_json::json;

const HOUR: i64 = 3_600_000;

fn stored_session(token: &str, expires_at: i64, next_refresh_at: i64) -> MemoryPreferenceStore {
    MemoryPreferenceStore::with_entries([
        (TOKEN_KEY, token.to_string()),
        (TOKEN_EXPIRES_KEY, expires_at.to_string()),
        (TOKEN_NEXT_REFRESH_KEY, next_refresh_at.to_string()),
    ])
}

fn auth_response(token: &str) -> serde_json::Value {
    let now = now_millis();
    json!({
        "user": {"id": "u1", "type": "user", "name": "Alice"},
        "jwt": {"access_token": token, "expires": now + HOUR, "refresh": now + HOUR / 2}
    })
}

#[tokio::test]
async fn test_sign_in_remembers_jwt() {
    let mock = MockHttpSend::default().json(auth_response("jwt-1"));
    let prefs = MemoryPreferenceStore::default();
    let client = client_with(&mock, prefs.clone(), SECRET_KEY);

    let user = client
        .sign_in("password", "alice@example.com::pass", true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.name, "Alice");
    assert_eq!(client.access_token().as_deref(), Some("jwt-1"));
    assert_eq!(client.token_status(), TokenStatus::Valid);
    assert_eq!(prefs.entries()[TOKEN_KEY], "jwt-1");

    client.invoke_get("dog", &Params::new()).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path_and_query(), "/jwt_auth");
    assert_eq!(
        requests[0].json(),
        json!({"appid": "app:para", "provider": "password", "token": "alice@example.com::pass"})
    );
    assert_eq!(requests[1].authorization(), "Bearer jwt-1");
    assert!(requests[1].headers.get("x-amz-date").is_none());
}

#[tokio::test]
async fn test_sign_in_without_remember_keeps_keys() {
    let mock = MockHttpSend::default().json(auth_response("jwt-1"));
    let client = client(&mock);

    let user = client.sign_in("facebook", "fb-token", false).await.unwrap();
    assert!(user.is_some());
    assert_eq!(client.token_status(), TokenStatus::Absent);
}

#[tokio::test]
async fn test_bad_sign_in_leaves_no_token() {
    let mock = MockHttpSend::default().json(json!({"user": null}));
    let prefs = stored_session("old", now_millis() + HOUR, now_millis() + HOUR / 2);
    let client = client_with(&mock, prefs.clone(), SECRET_KEY);

    let user = client.sign_in("password", "wrong", true).await.unwrap();
    assert!(user.is_none());
    assert!(client.access_token().is_none());
    assert!(prefs.entries().is_empty());
}

#[tokio::test]
async fn test_failed_sign_in_clears_token() {
    let mock = MockHttpSend::default().reply(400, Some("application/json"), r#"{"message":"bad"}"#);
    let prefs = stored_session("old", now_millis() + HOUR, now_millis() + HOUR / 2);
    let client = client_with(&mock, prefs.clone(), SECRET_KEY);

    let err = client.sign_in("password", "x", true).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServiceRejected);
    assert!(client.access_token().is_none());
    assert!(prefs.entries().is_empty());
}

#[tokio::test]
async fn test_sign_in_needs_provider_and_token() {
    let mock = MockHttpSend::default();
    let client = client(&mock);

    assert!(client.sign_in("", "x", true).await.unwrap().is_none());
    assert!(client.sign_in("google", "", true).await.unwrap().is_none());
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_due_token_is_refreshed_before_get() {
    let now = now_millis();
    let mock = MockHttpSend::default().json(auth_response("jwt-2"));
    let prefs = stored_session("jwt-1", now + HOUR, now - 1);
    let client = client_with(&mock, prefs.clone(), SECRET_KEY);
    assert_eq!(client.token_status(), TokenStatus::RefreshDue);

    client.invoke_get("dog", &Params::new()).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path_and_query(), "/jwt_auth");
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].authorization(), "Bearer jwt-1");
    assert_eq!(requests[1].path_and_query(), "/v1/dog");
    assert_eq!(requests[1].authorization(), "Bearer jwt-1");

    assert_eq!(client.access_token().as_deref(), Some("jwt-2"));
    assert_eq!(prefs.entries()[TOKEN_KEY], "jwt-2");
    assert_eq!(client.token_status(), TokenStatus::Valid);
}

#[tokio::test]
async fn test_expired_token_is_not_refreshed() {
    let now = now_millis();
    let mock = MockHttpSend::default();
    let client = client_with(&mock, stored_session("jwt-1", now - 1, now - HOUR), SECRET_KEY);
    assert_eq!(client.token_status(), TokenStatus::Expired);

    assert!(!client.refresh_token().await.unwrap());
    client.invoke_get("dog", &Params::new()).await.unwrap();

    let req = mock.only_request();
    assert_eq!(req.path_and_query(), "/v1/dog");
    assert_eq!(req.authorization(), "Bearer jwt-1");
}

#[tokio::test]
async fn test_failed_refresh_signs_out() {
    let now = now_millis();
    let mock = MockHttpSend::default().status(401);
    let prefs = stored_session("jwt-1", now + HOUR, now - 1);
    let client = client_with(&mock, prefs.clone(), SECRET_KEY);

    let err = client.refresh_token().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialExpired);
    assert_eq!(client.token_status(), TokenStatus::Absent);
    assert!(prefs.entries().is_empty());
}

#[tokio::test]
async fn test_sign_out_and_revoke() {
    let now = now_millis();
    let mock = MockHttpSend::default().text("true");
    let prefs = stored_session("jwt-1", now + HOUR, now + HOUR / 2);
    let client = client_with(&mock, prefs.clone(), SECRET_KEY);

    assert!(client.revoke_all_tokens().await.unwrap());
    client.sign_out();
    assert!(client.access_token().is_none());
    assert!(prefs.entries().is_empty());
    assert!(!client.revoke_all_tokens().await.unwrap());

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::DELETE);
    assert_eq!(requests[0].path_and_query(), "/jwt_auth");
    assert_eq!(requests[0].authorization(), "Bearer jwt-1");
    assert!(requests[1].authorization().starts_with("AWS4-HMAC-SHA256 "));
}

#[tokio::test]
async fn test_set_access_token_reads_claims() {
    let mock = MockHttpSend::default();
    let prefs = MemoryPreferenceStore::default();
    let client = client_with(&mock, prefs.clone(), SECRET_KEY);

    let exp = now_millis() / 1000 + 3600;
    let payload = base64_url_encode(format!(r#"{{"exp":{exp},"refresh":1}}"#).as_bytes());
    let jwt = format!("eyJhbGciOiJIUzI1NiJ9.{payload}.c2ln");

    client.set_access_token(&jwt).unwrap();
    assert_eq!(client.access_token().as_deref(), Some(jwt.as_str()));
    assert_eq!(client.token_status(), TokenStatus::RefreshDue);
    assert!(prefs.entries().is_empty());

    assert!(client.set_access_token("garbage").is_err());
}
