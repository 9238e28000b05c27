use crate::client;
use crate::mock::MockHttpSend;
use http::Method;
use para_client::{Pager, ParaObject};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_create_without_id_posts_to_type() {
    let mock = MockHttpSend::default().json(json!({"id": "generated", "type": "dog", "name": "Rex"}));
    let client = client(&mock);

    let mut dog = ParaObject::new("", "dog");
    dog.name = "Rex".to_string();
    let created = client.create(&dog).await.unwrap().unwrap();

    assert_eq!(created.id, "generated");
    let req = mock.only_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path_and_query(), "/v1/dog");
    assert_eq!(req.json()["name"], json!("Rex"));
    assert_eq!(req.json()["type"], json!("dog"));
}

#[tokio::test]
async fn test_create_with_id_puts_to_object_uri() {
    let mock = MockHttpSend::default().json(json!({"id": "123", "type": "dog"}));
    let client = client(&mock);

    client.create(&ParaObject::new("123", "dog")).await.unwrap();

    let req = mock.only_request();
    assert_eq!(req.method, Method::PUT);
    assert_eq!(req.path_and_query(), "/v1/dog/123");
}

#[tokio::test]
async fn test_read_with_and_without_type() {
    let mock = MockHttpSend::default()
        .json(json!({"id": "1", "type": "dog", "color": "brown"}))
        .json(json!({"id": "1", "type": "dog"}));
    let client = client(&mock);

    let dog = client.read(Some("dog"), "1").await.unwrap().unwrap();
    assert_eq!(dog.property("color"), Some(&json!("brown")));
    client.read(None, "1").await.unwrap();
    assert!(client.read(None, "").await.unwrap().is_none());

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path_and_query(), "/v1/dog/1");
    assert_eq!(requests[1].path_and_query(), "/v1/_id/1");
}

#[tokio::test]
async fn test_update_and_delete() {
    let mock = MockHttpSend::default().json(json!({"id": "1", "type": "dog", "name": "Max"}));
    let client = client(&mock);

    let mut dog = ParaObject::new("1", "dog");
    dog.name = "Max".to_string();
    let updated = client.update(&dog).await.unwrap().unwrap();
    assert_eq!(updated.name, "Max");
    client.delete(&dog).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].method, Method::PATCH);
    assert_eq!(requests[0].path_and_query(), "/v1/dog/1");
    assert_eq!(requests[1].method, Method::DELETE);
    assert_eq!(requests[1].path_and_query(), "/v1/dog/1");
}

#[tokio::test]
async fn test_batch_calls() {
    let mock = MockHttpSend::default()
        .json(json!([{"id": "1", "type": "dog"}, {"id": "2", "type": "dog"}]))
        .json(json!([{"id": "1", "type": "dog"}]));
    let client = client(&mock);

    let objects = vec![ParaObject::new("1", "dog"), ParaObject::new("2", "dog")];
    let created = client.create_all(&objects).await.unwrap();
    assert_eq!(created.len(), 2);
    let updated = client.update_all(&objects[..1]).await.unwrap();
    assert_eq!(updated.len(), 1);
    client.delete_all(&["1", "2"]).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path_and_query(), "/v1/_batch");
    assert_eq!(requests[0].json().as_array().unwrap().len(), 2);
    assert_eq!(requests[1].method, Method::PATCH);
    assert_eq!(requests[2].method, Method::DELETE);
    assert_eq!(requests[2].path_and_query(), "/v1/_batch?ids=1&ids=2");
}

#[tokio::test]
async fn test_empty_batches_skip_network() {
    let mock = MockHttpSend::default();
    let client = client(&mock);

    assert!(client.create_all(&[]).await.unwrap().is_empty());
    assert!(client.read_all::<&str>(&[]).await.unwrap().is_empty());
    assert!(client.update_all(&[]).await.unwrap().is_empty());
    client.delete_all::<String>(&[]).await.unwrap();
    assert!(client.list("", None).await.unwrap().is_empty());

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_list_sends_pager() {
    let mock = MockHttpSend::default().json(json!({
        "items": [{"id": "1", "type": "dog"}],
        "totalHits": 5,
        "lastKey": "1"
    }));
    let client = client(&mock);

    let pager = Pager::new(2, 1);
    let page = client.list("dog", Some(&pager)).await.unwrap();

    assert_eq!(page.total_hits, 5);
    assert_eq!(page.items[0].id, "1");
    assert_eq!(pager.next_page(&page).last_key.as_deref(), Some("1"));
    assert_eq!(
        mock.only_request().path_and_query(),
        "/v1/dog?desc=true&limit=1&page=2&sort=timestamp"
    );
}

#[tokio::test]
async fn test_list_without_pager_leaves_paging_to_server() {
    let mock = MockHttpSend::default().json(json!({"items": [], "totalHits": 0}));
    let client = client(&mock);

    let page = client.list("dog", None).await.unwrap();

    assert!(page.is_empty());
    assert_eq!(mock.only_request().path_and_query(), "/v1/dog");
}
