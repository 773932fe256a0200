//! Router-level tests driving the interceptor chain without a socket.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use bookstore::http::{build_router, X_REQUEST_ID};
use bookstore::store::{Book, MemStore, Store};

fn app() -> (Router, Arc<MemStore>) {
    let store = Arc::new(MemStore::new());
    (build_router(store.clone()), store)
}

fn request(method: Method, uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header(CONTENT_TYPE, ct);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_text(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

const BOOK_JSON: &str = r#"{"id":"978-1","name":"X","authors":["A"],"press":"P"}"#;

#[tokio::test]
async fn test_text_plain_rejected_before_handler() {
    let (app, store) = app();

    let res = app
        .oneshot(request(Method::POST, "/book", Some("text/plain"), BOOK_JSON))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body_text(res).await, "invalid Content-Type");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_json_content_type_proceeds() {
    let (app, store) = app();

    let res = app
        .oneshot(request(
            Method::POST,
            "/book",
            Some("application/json; charset=utf-8"),
            BOOK_JSON,
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "create ok");
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_missing_content_type_is_bad_request() {
    let (app, store) = app();

    let res = app
        .oneshot(request(Method::POST, "/book", None, BOOK_JSON))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(res).await, "mime: no media type");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_get_and_delete_skip_content_type_check() {
    let (app, store) = app();
    store
        .create(&Book { id: "1".into(), ..Default::default() })
        .unwrap();

    let res = app
        .clone()
        .oneshot(request(Method::GET, "/book/1", Some("text/plain"), ""))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(request(Method::DELETE, "/book/1", None, ""))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "delete ok");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (app, store) = app();

    let res = app
        .oneshot(request(Method::POST, "/book", Some("application/json"), "{\"id\":"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(!body_text(res).await.is_empty());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_update_uses_path_id() {
    let (app, store) = app();
    store
        .create(&Book { id: "real".into(), name: "Old".into(), ..Default::default() })
        .unwrap();

    let res = app
        .oneshot(request(
            Method::POST,
            "/book/real",
            Some("application/json"),
            r#"{"id":"ignored","name":"New","authors":[],"press":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_text(res).await, "update ok");
    assert_eq!(store.get("real").unwrap().name, "New");
    assert!(store.get("ignored").is_err());
}

#[tokio::test]
async fn test_get_one_returns_json() {
    let (app, store) = app();
    let book: Book = serde_json::from_str(BOOK_JSON).unwrap();
    store.create(&book).unwrap();

    let res = app
        .oneshot(request(Method::GET, "/book/978-1", None, ""))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
    let got: Book = serde_json::from_str(&body_text(res).await).unwrap();
    assert_eq!(got, book);
}

#[tokio::test]
async fn test_storage_errors_are_bad_request() {
    let (app, _store) = app();

    let res = app
        .clone()
        .oneshot(request(Method::GET, "/book/nope", None, ""))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(res).await.contains("not found"));

    let res = app
        .oneshot(request(
            Method::POST,
            "/book/nope",
            Some("application/json"),
            r#"{"name":"N"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(res).await.contains("not found"));
}

#[tokio::test]
async fn test_request_id_assigned_and_propagated() {
    let (app, _store) = app();

    let res = app
        .clone()
        .oneshot(request(Method::GET, "/book", None, ""))
        .await
        .unwrap();
    let generated = res.headers()[X_REQUEST_ID].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let mut req = request(Method::GET, "/book", None, "");
    req.headers_mut()
        .insert(X_REQUEST_ID, "client-chosen-id".parse().unwrap());
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.headers()[X_REQUEST_ID], "client-chosen-id");
}

#[tokio::test]
async fn test_malformed_content_type_params_are_bad_request() {
    let (app, store) = app();

    for content_type in ["application/json; charset", "application/json;=x"] {
        let res = app
            .clone()
            .oneshot(request(Method::POST, "/book", Some(content_type), BOOK_JSON))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", content_type);
        assert!(body_text(res).await.starts_with("mime: invalid media parameter"));
    }
    assert!(store.is_empty());
}
