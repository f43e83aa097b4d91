use crate::common::{UNREACHABLE_BASE_URL, create_test_client, serve_raw_once};
use assert_json_diff::assert_json_eq;
use mockito::Matcher;
use outsider_client::prelude::*;
use serde_json::{Value, json};

#[tokio::test]
async fn read_success_returns_body_and_leaves_error_state_alone() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/1")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":1,"name":"A"}"#)
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::new());
    ctx.errors.show("earlier failure").await;
    let before = ctx.errors.snapshot().await;

    let user: Value = ctx.client.read("/users/1", None).await.unwrap();

    assert_json_eq!(user, json!({"id": 1, "name": "A"}));
    assert_eq!(ctx.errors.snapshot().await, before);
    mock.assert_async().await;
}

#[tokio::test]
async fn no_stored_token_sends_no_authorization_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chats")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::new());
    let chats: Vec<Value> = ctx.client.read("/chats", None).await.unwrap();

    assert!(chats.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn stored_token_is_sent_as_bearer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chats")
        .match_header("authorization", "Bearer tok-42")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::with_token("tok-42"));
    let _: Vec<Value> = ctx.client.read("/chats", None).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn csrf_token_from_page_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/images")
        .match_header("x-csrf-token", "page-token")
        .match_body(Matcher::Json(json!({"prompt": "a red fox"})))
        .with_status(201)
        .with_body(r#"{"id":"img-1"}"#)
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::new());
    let client = ctx.client.with_token_source(Arc::new(MetaTagTokenSource::new(
        r#"<meta name="csrf-token" content="page-token">"#,
    )));

    let created: Value = client
        .create("/images", &json!({"prompt": "a red fox"}), None)
        .await
        .unwrap();

    assert_eq!(created["id"], "img-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn create_failure_surfaces_body_error_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/login")
        .match_body(Matcher::Json(json!({"bad": true})))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Invalid credentials"}"#)
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::new());
    let result: Result<Value, AppError> = ctx.client.create("/login", &json!({"bad": true}), None).await;

    let error = result.unwrap_err();
    assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
    let surface = ctx.errors.snapshot().await;
    assert!(surface.visible);
    assert_eq!(surface.message, "Invalid credentials");
    assert!(ctx.navigator.redirects.lock().await.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn remove_unauthorized_invalidates_session_and_still_fails() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/sessions/9")
        .match_header("authorization", "Bearer expired")
        .with_status(401)
        .with_body(r#"{"message":"token expired"}"#)
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::with_token("expired"));
    let result: Result<Value, AppError> = ctx.client.remove("/sessions/9", None).await;

    assert!(result.unwrap_err().is_unauthorized());
    assert_eq!(ctx.store.auth_token().await.unwrap(), None);
    assert_eq!(*ctx.navigator.redirects.lock().await, vec!["/login".to_string()]);
    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_without_stored_token_still_redirects() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chats")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::new());
    let result: Result<Value, AppError> = ctx.client.read("/chats", None).await;

    assert!(result.unwrap_err().is_unauthorized());
    assert_eq!(ctx.store.auth_token().await.unwrap(), None);
    assert_eq!(*ctx.navigator.redirects.lock().await, vec!["/login".to_string()]);
    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_with_unreadable_body_invalidates_session() {
    let base_url = serve_raw_once(
        "HTTP/1.1 401 Unauthorized\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort",
    );

    let ctx = create_test_client(&base_url, MemorySessionStore::with_token("expired"));
    let result: Result<Value, AppError> = ctx.client.remove("/sessions/9", None).await;

    let error = result.unwrap_err();
    assert!(error.is_unauthorized());
    assert_eq!(error.response().unwrap().body, Value::Null);
    assert_eq!(ctx.store.auth_token().await.unwrap(), None);
    assert_eq!(*ctx.navigator.redirects.lock().await, vec!["/login".to_string()]);
    assert_eq!(
        ctx.errors.message().await,
        "request failed with status code 401"
    );
}

#[tokio::test]
async fn unauthorized_error_field_is_surfaced_by_helpers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Session expired"}"#)
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::with_token("old"));
    let result: Result<Value, AppError> = ctx
        .client
        .create("/chat", &json!({"message": "hi"}), None)
        .await;

    assert!(result.unwrap_err().is_unauthorized());
    assert_eq!(ctx.store.auth_token().await.unwrap(), None);
    assert_eq!(ctx.navigator.redirects.lock().await.len(), 1);
    assert_eq!(ctx.errors.message().await, "Session expired");
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_server_surfaces_connectivity_message() {
    let ctx = create_test_client(UNREACHABLE_BASE_URL, MemorySessionStore::with_token("tok"));

    let result: Result<Value, AppError> = ctx.client.read("/users/1", None).await;

    assert!(result.unwrap_err().is_network());
    let surface = ctx.errors.snapshot().await;
    assert!(surface.visible);
    assert_eq!(
        surface.message,
        "Unable to reach the server. Please check your connection."
    );
    assert!(ctx.store.is_authenticated().await);
    assert!(ctx.navigator.redirects.lock().await.is_empty());
}

#[tokio::test]
async fn send_does_not_classify_status_failures() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/missing")
        .with_status(404)
        .with_body(r#"{"error":"Not here"}"#)
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::new());
    let result = ctx
        .client
        .send(Method::GET, "/missing", None::<&Value>, &RequestOptions::new())
        .await;

    let error = result.unwrap_err();
    assert_eq!(error.response().unwrap().error_field().as_deref(), Some("Not here"));
    assert_eq!(error.response().unwrap().request.path, "/missing");
    assert!(!ctx.errors.is_visible().await);
    mock.assert_async().await;
}

#[tokio::test]
async fn failure_without_body_message_uses_status_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/generate")
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::new());
    let result: Result<Value, AppError> = ctx.client.read("/generate", None).await;

    let error = result.unwrap_err();
    assert_eq!(
        error.response().unwrap().body,
        json!("Service Unavailable")
    );
    assert_eq!(
        ctx.errors.message().await,
        "request failed with status code 503"
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn request_build_failure_is_surfaced_by_helpers() {
    let ctx = create_test_client("not a url", MemorySessionStore::new());

    let result: Result<Value, AppError> = ctx.client.read("/users/1", None).await;

    assert!(matches!(result, Err(AppError::RequestBuild(_))));
    assert!(ctx.errors.is_visible().await);
    assert!(ctx.errors.message().await.contains("invalid url"));
}

#[tokio::test]
async fn unexpected_success_body_shape_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/1")
        .with_status(200)
        .with_body(r#"{"id":1}"#)
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::new());
    let result: Result<Vec<u32>, AppError> = ctx.client.read("/users/1", None).await;

    assert!(matches!(result, Err(AppError::Deserialization(_))));
    assert!(ctx.errors.is_visible().await);
    mock.assert_async().await;
}

#[tokio::test]
async fn options_add_query_and_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chats")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .match_header("x-client-version", "7")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::new());
    let options = RequestOptions::new()
        .with_query("page", "2")
        .with_header("X-Client-Version", "7");
    let _: Vec<Value> = ctx.client.read("/chats", Some(options)).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn handle_api_error_uses_default_message_as_last_resort() {
    let ctx = create_test_client("http://localhost:3001", MemorySessionStore::new());

    let error = ctx
        .client
        .handle_api_error(AppError::InvalidInput(String::new()), Some("Could not send message"))
        .await;

    assert!(matches!(error, AppError::InvalidInput(_)));
    assert_eq!(ctx.errors.message().await, "Could not send message");
}

#[tokio::test]
async fn concurrent_failures_leave_the_last_message() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("GET", "/a")
        .with_status(400)
        .with_body(r#"{"error":"A failed"}"#)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/b")
        .with_status(400)
        .with_body(r#"{"error":"B failed"}"#)
        .create_async()
        .await;

    let ctx = create_test_client(&server.url(), MemorySessionStore::new());
    let (a, b) = tokio::join!(
        ctx.client.read::<Value>("/a", None),
        ctx.client.read::<Value>("/b", None)
    );

    assert!(a.is_err() && b.is_err());
    let message = ctx.errors.message().await;
    assert!(message == "A failed" || message == "B failed");
    first.assert_async().await;
    second.assert_async().await;
}
