//! Owner file endpoints, with a local stand-in for the pinning service.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use pinshare_core::config::AppConfig;

use helpers::TestApp;

const BOUNDARY: &str = "pinshare-test-boundary";

async fn spawn_pinning_service() -> String {
    let app = Router::new().route(
        "/pinning/pinFileToIPFS",
        post(|| async {
            Json(json!({
                "IpfsHash": "QmUploadedContent123",
                "PinSize": 5,
                "Timestamp": "2024-05-01T10:00:00Z",
            }))
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

async fn app_with_pinning() -> TestApp {
    let mut config = AppConfig::default();
    config.pinning.api_url = spawn_pinning_service().await;
    config.pinning.api_key = "key".into();
    config.pinning.secret_key = "secret".into();
    config.pinning.timeout_seconds = 5;
    TestApp::with_config(config)
}

fn upload_request(file_name: &str, content: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );

    let mut req = Request::builder()
        .method("POST")
        .uri("/api/files")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    for (name, value) in headers {
        req = req.header(*name, *value);
    }
    req.body(Body::from(body)).expect("request")
}

#[tokio::test]
async fn test_upload_list_delete() {
    let app = app_with_pinning().await;
    let alice = [("x-user-id", "alice")];

    let uploaded = app.send(upload_request("notes.txt", "hello", &alice)).await;
    assert_eq!(uploaded.status, StatusCode::CREATED, "{:?}", uploaded.body);
    assert_eq!(uploaded.body["data"]["content_id"], "QmUploadedContent123");
    assert_eq!(uploaded.body["data"]["name"], "notes.txt");
    assert_eq!(uploaded.body["data"]["size_bytes"], 5);
    let id = uploaded.body["data"]["id"]
        .as_str()
        .expect("id")
        .to_string();

    let listed = app.request("GET", "/api/files", None, &alice).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().map(Vec::len), Some(1));

    let other = app
        .request("GET", "/api/files", None, &[("x-user-id", "bob")])
        .await;
    assert_eq!(other.body["data"], Value::Array(vec![]));

    let forbidden = app
        .request(
            "DELETE",
            &format!("/api/files/{id}"),
            None,
            &[("x-user-id", "bob")],
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = app
        .request("DELETE", &format!("/api/files/{id}"), None, &alice)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let missing = app
        .request("GET", &format!("/api/files/{id}"), None, &alice)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wallet_owner_sees_files() {
    let app = app_with_pinning().await;
    let wallet = [("x-wallet-address", "0xABCDEF")];

    let uploaded = app.send(upload_request("a.txt", "hello", &wallet)).await;
    assert_eq!(uploaded.status, StatusCode::CREATED);

    let listed = app
        .request(
            "GET",
            "/api/files",
            None,
            &[("x-user-id", "carol"), ("x-wallet-address", "0xabcdef")],
        )
        .await;
    assert_eq!(listed.body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_anonymous_caller_rejected() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/files", None, &[]).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_without_pinning_keys_is_unavailable() {
    let app = TestApp::new();
    let response = app
        .send(upload_request("a.txt", "hello", &[("x-user-id", "alice")]))
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "SERVICE_UNAVAILABLE");
}
