use super::{authorization, sign_at_fixed_time};
use http::Method;
use para_core::hash::EMPTY_STRING_SHA256;
use para_v4::Credential;
use pretty_assertions::assert_eq;
use sha2::{Digest, Sha256};

#[test]
fn test_get_credential_scope() {
    let req = sign_at_fixed_time(
        Method::GET,
        "https://api.example.com/v1/users/123",
        EMPTY_STRING_SHA256,
        &Credential::new("AK", "SK"),
    );

    let auth = authorization(&req);
    let credential = auth
        .split(", ")
        .next()
        .and_then(|s| s.strip_prefix("AWS4-HMAC-SHA256 Credential="))
        .expect("credential field must exist");
    assert_eq!(credential, "AK/20160315/us-east-1/para/aws4_request");
}

#[test]
fn test_get_request() {
    let req = sign_at_fixed_time(
        Method::GET,
        "https://api.example.com/v1/users/123",
        EMPTY_STRING_SHA256,
        &Credential::new("AK", "SK"),
    );

    assert_eq!(
        authorization(&req),
        "AWS4-HMAC-SHA256 Credential=AK/20160315/us-east-1/para/aws4_request, \
         SignedHeaders=host;x-amz-date, \
         Signature=a8e5bf8cb0e5c641a61560ef5e6c0feae8a7fc5069bc3bcdb11461a262b38e2e"
    );
}

#[test]
fn test_post_request_with_body_digest() {
    let body = r#"{"name":"Rex","type":"dog"}"#;
    let digest = hex::encode(Sha256::digest(body.as_bytes()));
    assert_eq!(
        digest,
        "87e615fcd5c71d89e8198b50e1ea844008d3d4b5701a1198859c6ec9b43ae089"
    );

    let req = sign_at_fixed_time(
        Method::POST,
        "http://localhost:8080/v1/dog",
        &digest,
        &Credential::new("app:para", "secret"),
    );

    assert_eq!(req.headers[http::header::HOST], "localhost:8080");
    assert_eq!(
        authorization(&req),
        "AWS4-HMAC-SHA256 Credential=app:para/20160315/us-east-1/para/aws4_request, \
         SignedHeaders=host;x-amz-date, \
         Signature=195b83d7156030e7225bf44af92173e75b6ac7c919e1606b84c0ffa2ffc9a09d"
    );
}

#[test]
fn test_get_request_with_query() {
    let req = sign_at_fixed_time(
        Method::GET,
        "http://localhost:8080/v1/search/ids?ids=a&limit=30",
        EMPTY_STRING_SHA256,
        &Credential::new("app:para", "secret"),
    );

    assert_eq!(
        authorization(&req),
        "AWS4-HMAC-SHA256 Credential=app:para/20160315/us-east-1/para/aws4_request, \
         SignedHeaders=host;x-amz-date, \
         Signature=9084f81f1893eacf9b2efed9ab751412063eca91d87faa09b029e3f68a66d909"
    );
}

#[test]
fn test_signature_depends_on_secret() {
    let url = "https://api.example.com/v1/users/123";
    let a = sign_at_fixed_time(Method::GET, url, EMPTY_STRING_SHA256, &Credential::new("AK", "SK"));
    let b = sign_at_fixed_time(Method::GET, url, EMPTY_STRING_SHA256, &Credential::new("AK", "SK2"));

    assert_ne!(authorization(&a), authorization(&b));
}
