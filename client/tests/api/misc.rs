use crate::mock::MockHttpSend;
use crate::{client, ACCESS_KEY};
use http::Method;
use para_client::{Constraint, ParaObject};
use pretty_assertions::assert_eq;
use serde_json::{json, Map};

#[tokio::test]
async fn test_me_is_the_app() {
    let mock = MockHttpSend::default().json(json!({"id": ACCESS_KEY, "type": "app", "name": "para"}));
    let client = client(&mock);

    let me = client.me(None).await.unwrap().unwrap();
    assert_eq!(me.id, "app:para");
    assert_eq!(me.object_type, "app");
}

#[tokio::test]
async fn test_me_with_explicit_token() {
    let mock = MockHttpSend::default().json(json!({"id": "u1", "type": "user"}));
    let client = client(&mock);

    let me = client.me(Some("Bearer user-jwt")).await.unwrap().unwrap();
    assert_eq!(me.id, "u1");
    assert_eq!(mock.only_request().authorization(), "Bearer user-jwt");
}

#[tokio::test]
async fn test_utils() {
    let mock = MockHttpSend::default()
        .text("1458043200000")
        .text("some-text")
        .text("5 minutes");
    let client = client(&mock);

    assert_eq!(client.get_timestamp().await.unwrap(), 1458043200000);
    assert_eq!(
        client.no_spaces("a b", "-").await.unwrap().as_deref(),
        Some("some-text")
    );
    assert_eq!(
        client.approximately(300_000).await.unwrap().as_deref(),
        Some("5 minutes")
    );
    assert!(client.new_id().await.unwrap().is_none());

    let requests = mock.requests();
    assert_eq!(requests[0].path_and_query(), "/v1/utils/timestamp");
    assert_eq!(
        requests[1].path_and_query(),
        "/v1/utils/nospaces?replacement=-&string=a%20b"
    );
    assert_eq!(requests[2].path_and_query(), "/v1/utils/timeago?delta=300000");
    assert_eq!(requests[3].path_and_query(), "/v1/utils/newid");
}

#[tokio::test]
async fn test_new_keys_rotates_secret() {
    let mock = MockHttpSend::default().json(json!({"accessKey": ACCESS_KEY, "secretKey": "rotated"}));
    let client = client(&mock);

    let keys = client.new_keys().await.unwrap();
    assert_eq!(keys["secretKey"], json!("rotated"));

    client.me(None).await.unwrap();
    let requests = mock.requests();
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path_and_query(), "/v1/_newkeys");
    // Same request and time, different key: the signature must change.
    assert!(!requests[1].authorization().ends_with(
        "fd7528cad39a59043bfe804442c65ae764304a4beda2e3bf58d3363e8f6440b3"
    ));
}

#[tokio::test]
async fn test_votes() {
    let mock = MockHttpSend::default().text("true").text("false");
    let client = client(&mock);
    let dog = ParaObject::new("1", "dog");

    assert!(client.vote_up(&dog, "u1").await.unwrap());
    assert!(!client.vote_down(&dog, "u1").await.unwrap());
    assert!(!client.vote_up(&dog, "").await.unwrap());

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::PATCH);
    assert_eq!(requests[0].json(), json!({"_voteup": "u1"}));
    assert_eq!(requests[1].json(), json!({"_votedown": "u1"}));
}

#[tokio::test]
async fn test_types_and_version() {
    let mock = MockHttpSend::default()
        .json(json!({"dogs": "dog", "users": "user"}))
        .json(json!({"dogs": 3}))
        .json(json!({"info": "Para"}));
    let client = client(&mock);

    assert_eq!(client.types().await.unwrap()["dogs"], "dog");
    assert_eq!(client.types_count().await.unwrap()["dogs"], 3);
    assert_eq!(client.server_version().await.unwrap(), "unknown");

    let requests = mock.requests();
    assert_eq!(requests[1].path_and_query(), "/v1/_types?count=true");
    assert_eq!(requests[2].path_and_query(), "/v1/");
}

#[tokio::test]
async fn test_rebuild_index() {
    let mock = MockHttpSend::default().json(json!({"reindexed": 10}));
    let client = client(&mock);

    let res = client.rebuild_index(Some("index-2")).await.unwrap();
    assert_eq!(res["reindexed"], json!(10));

    let req = mock.only_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path_and_query(), "/v1/_reindex?destinationIndex=index-2");
}

#[tokio::test]
async fn test_constraints() {
    let mock = MockHttpSend::default()
        .json(json!({"dog": {"name": {"required": {}}}}))
        .json(json!({"dog": {"age": {"max": {"value": 20}}}}));
    let client = client(&mock);

    let all = client.validation_constraints(Some("dog")).await.unwrap();
    assert!(all.contains_key("dog"));
    client
        .add_validation_constraint("dog", "age", &Constraint::max(20))
        .await
        .unwrap();
    client
        .remove_validation_constraint("dog", "age", "max")
        .await
        .unwrap();
    assert!(client
        .add_validation_constraint("", "age", &Constraint::required())
        .await
        .unwrap()
        .is_empty());

    let requests = mock.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].path_and_query(), "/v1/_constraints/dog");
    assert_eq!(requests[1].method, Method::PUT);
    assert_eq!(requests[1].path_and_query(), "/v1/_constraints/dog/age/max");
    assert_eq!(
        requests[1].json(),
        json!({"value": 20, "message": "messages.max"})
    );
    assert_eq!(requests[2].method, Method::DELETE);
}

#[tokio::test]
async fn test_permissions() {
    let mock = MockHttpSend::default()
        .json(json!({"*": {"dog": ["GET", "?"]}}))
        .text("true");
    let client = client(&mock);

    client
        .grant_resource_permission("*", "dog", &["GET"], true)
        .await
        .unwrap();
    assert!(client.is_allowed_to("*", "dog", "GET").await.unwrap());
    assert!(!client.is_allowed_to("", "dog", "GET").await.unwrap());
    client.revoke_all_resource_permissions("u1").await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].method, Method::PUT);
    assert_eq!(requests[0].path_and_query(), "/v1/_permissions/%2A/dog");
    assert_eq!(requests[0].json(), json!(["GET", "?"]));
    assert_eq!(requests[1].path_and_query(), "/v1/_permissions/%2A/dog/GET");
    assert_eq!(requests[2].method, Method::DELETE);
    assert_eq!(requests[2].path_and_query(), "/v1/_permissions/u1");
}

#[tokio::test]
async fn test_settings() {
    let mock = MockHttpSend::default().json(json!({"value": 42}));
    let client = client(&mock);

    let setting = client.app_settings(Some("answer")).await.unwrap();
    assert_eq!(setting["value"], json!(42));
    client.add_app_setting("answer", json!(43)).await.unwrap();
    assert!(client.set_app_settings(&Map::new()).await.unwrap().is_none());
    assert!(client.remove_app_setting("").await.unwrap().is_none());

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path_and_query(), "/v1/_settings/answer");
    assert_eq!(requests[1].method, Method::PUT);
    assert_eq!(requests[1].json(), json!({"value": 43}));
}
