use api_rest::{router, AppState};
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use invite_core::{
    AppConfig, CommentService, Document, DocumentStore, MemoryStore, SheetForwarder,
    StoreBackend, StoreError, StoreResult,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Wraps a `MemoryStore` and counts writes.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    creates: AtomicUsize,
}

impl DocumentStore for CountingStore {
    fn create_document(&self, collection: &str, record: Document) -> StoreResult<String> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create_document(collection, record)
    }

    fn get_documents(
        &self,
        collection: &str,
        filter: &Document,
        limit: usize,
    ) -> StoreResult<Vec<Document>> {
        self.inner.get_documents(collection, filter, limit)
    }

    fn list_collections(&self) -> StoreResult<Vec<String>> {
        self.inner.list_collections()
    }

    fn database_name(&self) -> &str {
        self.inner.database_name()
    }
}

/// Every operation fails as if the database were down.
struct UnavailableStore;

impl DocumentStore for UnavailableStore {
    fn create_document(&self, _collection: &str, _record: Document) -> StoreResult<String> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn get_documents(
        &self,
        _collection: &str,
        _filter: &Document,
        _limit: usize,
    ) -> StoreResult<Vec<Document>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn list_collections(&self) -> StoreResult<Vec<String>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn database_name(&self) -> &str {
        "wedding"
    }
}

fn app_with(store: Arc<dyn DocumentStore>, forwarder: SheetForwarder) -> Router {
    let config = AppConfig::new(
        8000,
        StoreBackend::Memory,
        PathBuf::from("unused"),
        "wedding".into(),
        None,
    )
    .unwrap();
    router(AppState::new(
        Arc::new(config),
        CommentService::new(store, forwarder),
    ))
}

fn app() -> Router {
    app_with(
        Arc::new(MemoryStore::new()),
        SheetForwarder::new(None).unwrap(),
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes)))
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
}

async fn post_raw(app: &Router, body: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri("/api/comments")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
}

async fn post(app: &Router, body: Value) -> (StatusCode, Value) {
    post_raw(app, &body.to_string()).await
}

#[tokio::test]
async fn test_root_and_hello() {
    let app = app();

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Wedding Invitation Backend is running"}));

    let (status, body) = get(&app, "/api/hello").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Hello from the backend API!"}));
}

#[tokio::test]
async fn test_create_comment_echoes_fields() {
    let app = app();
    let (status, body) = post(
        &app,
        json!({"name": "Alice", "message": "See you there!", "attending": true, "guests": 2}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().expect("id");
    assert!(!id.is_empty());
    assert_eq!(
        body,
        json!({
            "id": id,
            "name": "Alice",
            "message": "See you there!",
            "attending": true,
            "guests": 2,
            "phone": null
        })
    );
}

#[tokio::test]
async fn test_create_comment_applies_defaults() {
    let app = app();
    let (status, body) = post(&app, json!({"name": "Bob", "message": "Congrats"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["guests"], json!(1));
    assert_eq!(body["attending"], Value::Null);
    assert_eq!(body["phone"], Value::Null);
}

#[tokio::test]
async fn test_missing_name_is_rejected_without_store_write() {
    let store = Arc::new(CountingStore::default());
    let app = app_with(store.clone(), SheetForwarder::new(None).unwrap());

    let (status, body) = post(&app, json!({"message": "no name"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().expect("detail").contains("name"));
    assert_eq!(store.creates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_message_is_rejected_without_store_write() {
    let store = Arc::new(CountingStore::default());
    let app = app_with(store.clone(), SheetForwarder::new(None).unwrap());

    let (status, body) = post(&app, json!({"name": "Carol"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().expect("detail").contains("message"));
    assert_eq!(store.creates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_wrong_field_type_is_bad_request() {
    let store = Arc::new(CountingStore::default());
    let app = app_with(store.clone(), SheetForwarder::new(None).unwrap());

    let (status, body) = post(&app, json!({"name": 5, "message": "x"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
    assert_eq!(store.creates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (status, body) = post_raw(&app(), "{\"name\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_list_preserves_order_and_honours_limit() {
    let app = app();
    let (_, first) = post(&app, json!({"name": "A", "message": "one"})).await;
    let (_, second) = post(&app, json!({"name": "B", "message": "two"})).await;

    let (status, body) = get(&app, "/api/comments").await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().expect("array");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], first["id"]);
    assert_eq!(listed[1]["id"], second["id"]);

    let (status, body) = get(&app, "/api/comments?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().expect("array");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], first["id"]);
}

#[tokio::test]
async fn test_invalid_limit_is_bad_request_with_detail() {
    let app = app();
    for uri in ["/api/comments?limit=lots", "/api/comments?limit=-3"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["detail"].is_string(), "{uri}: {body}");
    }
}

#[tokio::test]
async fn test_identical_submissions_are_not_deduplicated() {
    let app = app();
    let payload = json!({"name": "Dana", "message": "Same again"});

    let (_, a) = post(&app, payload.clone()).await;
    let (_, b) = post(&app, payload).await;
    assert_ne!(a["id"], b["id"]);

    let (_, body) = get(&app, "/api/comments").await;
    assert_eq!(body.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn test_successful_forward_sends_submission() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::POST).path("/exec").json_body(json!({
                "name": "Alice",
                "message": "See you there!",
                "attending": true,
                "guests": 2,
                "phone": "07700 900123"
            }));
            then.status(200).body("{\"result\":\"success\"}");
        })
        .await;

    let app = app_with(
        Arc::new(MemoryStore::new()),
        SheetForwarder::new(Some(server.url("/exec"))).unwrap(),
    );
    let (status, body) = post(
        &app,
        json!({
            "name": "Alice",
            "message": "See you there!",
            "attending": true,
            "guests": 2,
            "phone": "07700 900123"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["phone"], json!("07700 900123"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rejected_forward_does_not_affect_response() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::POST).path("/exec");
            then.status(502).body("bad gateway");
        })
        .await;

    let app = app_with(
        Arc::new(MemoryStore::new()),
        SheetForwarder::new(Some(server.url("/exec"))).unwrap(),
    );
    let (status, body) = post(&app, json!({"name": "Eve", "message": "Hooray"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], json!("Eve"));
    assert_eq!(body["guests"], json!(1));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_timed_out_forward_does_not_affect_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::POST).path("/slow");
            then.status(200).delay(Duration::from_millis(1500));
        })
        .await;

    let app = app_with(
        Arc::new(MemoryStore::new()),
        SheetForwarder::with_timeout(Some(server.url("/slow")), Duration::from_millis(100))
            .unwrap(),
    );
    let (status, body) = post(&app, json!({"name": "Finn", "message": "Late reply"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().expect("id").is_empty());

    let (_, listed) = get(&app, "/api/comments").await;
    assert_eq!(listed.as_array().expect("array").len(), 1);
}

#[tokio::test]
async fn test_store_read_failure_is_server_error() {
    let app = app_with(Arc::new(UnavailableStore), SheetForwarder::new(None).unwrap());

    let (status, body) = get(&app, "/api/comments").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .expect("detail")
        .contains("connection refused"));
}

#[tokio::test]
async fn test_store_write_failure_is_server_error_and_not_forwarded() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::POST).path("/exec");
            then.status(200);
        })
        .await;

    let app = app_with(
        Arc::new(UnavailableStore),
        SheetForwarder::new(Some(server.url("/exec"))).unwrap(),
    );
    let (status, body) = post(&app, json!({"name": "Gus", "message": "Hi"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].is_string());
    assert_eq!(mock.calls_async().await, 0);
}

#[tokio::test]
async fn test_diagnostics_reports_collections() {
    let app = app();
    post(&app, json!({"name": "Hana", "message": "Yay"})).await;

    let (status, body) = get(&app, "/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connection_status"], json!("Connected"));
    assert_eq!(body["database_name"], json!("wedding"));
    assert_eq!(body["collections"], json!(["comment"]));
    assert_eq!(body["apps_script_url"], json!("Not Set"));
}

#[tokio::test]
async fn test_diagnostics_reports_store_errors() {
    let app = app_with(Arc::new(UnavailableStore), SheetForwarder::new(None).unwrap());

    let (status, body) = get(&app, "/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connection_status"], json!("Error"));
    assert!(body["database"]
        .as_str()
        .expect("database")
        .starts_with("Connected but Error"));
    assert_eq!(body["collections"], json!([]));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (status, body) = get(&app(), "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/comments"].is_object());
}
