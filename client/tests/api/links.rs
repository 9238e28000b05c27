use crate::client;
use crate::mock::MockHttpSend;
use http::Method;
use para_client::ParaObject;
use pretty_assertions::assert_eq;
use serde_json::json;

fn dog() -> ParaObject {
    ParaObject::new("1", "dog")
}

#[tokio::test]
async fn test_links() {
    let mock = MockHttpSend::default()
        .json(json!({"totalHits": 4}))
        .text("true")
        .text("link-id")
        .json(json!({"items": [{"id": "c1", "type": "cat"}], "totalHits": 1}));
    let client = client(&mock);

    assert_eq!(client.count_links(&dog(), "cat").await.unwrap(), 4);
    assert!(client
        .is_linked_to_object(&dog(), &ParaObject::new("c1", "cat"))
        .await
        .unwrap());
    assert_eq!(
        client.link(&dog(), "c1").await.unwrap().as_deref(),
        Some("link-id")
    );
    let page = client
        .find_linked_objects(&dog(), "cat", "name", None, None)
        .await
        .unwrap();
    assert_eq!(page.items[0].id, "c1");
    client.unlink(&dog(), "cat", "c1").await.unwrap();
    client.unlink_all(&dog()).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].path_and_query(), "/v1/dog/1/links/cat?count=true");
    assert_eq!(requests[1].path_and_query(), "/v1/dog/1/links/cat/c1");
    assert_eq!(requests[2].method, Method::POST);
    assert_eq!(requests[2].path_and_query(), "/v1/dog/1/links/c1");
    assert!(requests[2].body.is_empty());
    assert!(requests[3].path_and_query().contains("field=name"));
    assert!(requests[3].path_and_query().contains("q=%2A"));
    assert_eq!(requests[4].method, Method::DELETE);
    assert_eq!(requests[4].path_and_query(), "/v1/dog/1/links/cat/c1");
    assert_eq!(requests[5].path_and_query(), "/v1/dog/1/links");
}

#[tokio::test]
async fn test_children() {
    let mock = MockHttpSend::default()
        .json(json!({"totalHits": 2}))
        .json(json!({"items": [], "totalHits": 0}));
    let client = client(&mock);

    assert_eq!(client.count_children(&dog(), "puppy").await.unwrap(), 2);
    client
        .get_children_by_term(&dog(), "puppy", "color", "black", None)
        .await
        .unwrap();
    client.delete_children(&dog(), "puppy").await.unwrap();

    let requests = mock.requests();
    assert_eq!(
        requests[0].path_and_query(),
        "/v1/dog/1/links/puppy?childrenonly=true&count=true"
    );
    let q = requests[1].path_and_query();
    assert!(q.contains("childrenonly=true"));
    assert!(q.contains("field=color"));
    assert!(q.contains("term=black"));
    assert_eq!(requests[2].method, Method::DELETE);
    assert_eq!(
        requests[2].path_and_query(),
        "/v1/dog/1/links/puppy?childrenonly=true"
    );
}

#[tokio::test]
async fn test_missing_ids_skip_network() {
    let mock = MockHttpSend::default();
    let client = client(&mock);
    let orphan = ParaObject::new("", "dog");

    assert_eq!(client.count_links(&orphan, "cat").await.unwrap(), 0);
    assert!(!client.is_linked(&dog(), "cat", "").await.unwrap());
    assert!(client.link(&orphan, "c1").await.unwrap().is_none());
    assert!(client.get_children(&dog(), "", None).await.unwrap().is_empty());
    assert!(client
        .find_children(&orphan, "cat", Some("x"), None)
        .await
        .unwrap()
        .is_empty());
    client.unlink_all(&orphan).await.unwrap();

    assert!(mock.requests().is_empty());
}
