//! Backup endpoints against in-memory stores.

mod common;

use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use serde_json::json;

use frognote_core::types::UserId;

use common::{TestApp, empty_request, json_request, multipart_request};

#[tokio::test]
async fn test_save_then_list_and_download() {
    let app = TestApp::new();
    let token = app.sign_up("frog", "kero").await;
    let blob = [0u8, 159, 146, 150, 255];

    let response = app
        .send(multipart_request("/backup/save", &token, "backup", &blob))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text());
    assert_eq!(app.backups.count(), 1);

    let response = app
        .send(empty_request(Method::GET, "/backup/allmeta", Some(&token)))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!([{ "backupId": 1, "savedAt": "2024-05-01 09:00:00" }])
    );

    let response = app
        .send(json_request(
            Method::POST,
            "/backup/download",
            Some(&token),
            json!({ "value": 1 }),
        ))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[CONTENT_TYPE], "application/octet-stream");
    assert_eq!(response.body.as_ref(), &blob);
}

#[tokio::test]
async fn test_save_requires_backup_field() {
    let app = TestApp::new();
    let token = app.sign_up("frog", "kero").await;

    let response = app
        .send(multipart_request("/backup/save", &token, "other", b"data"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.backups.count(), 0);
}

#[tokio::test]
async fn test_oversized_upload_is_client_error_and_not_logged() {
    let app = TestApp::with_config(|config| config.server.max_body_bytes = 1024);
    let token = app.sign_up("frog", "kero").await;

    let response = app
        .send(multipart_request("/backup/save", &token, "backup", &[7u8; 4096]))
        .await;
    assert!(response.status.is_client_error(), "{}", response.status);
    assert_eq!(app.backups.count(), 0);
    assert!(app.error_log_lines().is_empty());
}

#[tokio::test]
async fn test_save_rejects_non_multipart() {
    let app = TestApp::new();
    let token = app.sign_up("frog", "kero").await;

    let response = app
        .send(json_request(
            Method::POST,
            "/backup/save",
            Some(&token),
            json!({ "backup": "data" }),
        ))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_allmeta_lists_only_own_backups() {
    let app = TestApp::new();
    let token = app.sign_up("frog", "kero").await;
    app.backups.insert(UserId::new(1), b"mine");
    app.backups.insert(UserId::new(2), b"theirs");
    app.backups.insert(UserId::new(1), b"mine too");

    let response = app
        .send(empty_request(Method::GET, "/backup/allmeta", Some(&token)))
        .await;
    let ids: Vec<i64> = response
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["backupId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_allmeta_empty_list() {
    let app = TestApp::new();
    let token = app.sign_up("frog", "kero").await;
    let response = app
        .send(empty_request(Method::GET, "/backup/allmeta", Some(&token)))
        .await;
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn test_foreign_backup_is_unauthorized() {
    let app = TestApp::new();
    let token = app.sign_up("frog", "kero").await;
    let foreign = app.backups.insert(UserId::new(99), b"secret");

    let response = app
        .send(json_request(
            Method::POST,
            "/backup/download",
            Some(&token),
            json!({ "value": foreign.value() }),
        ))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text(), "Unauthorized");

    let response = app
        .send(json_request(
            Method::DELETE,
            "/backup/delete",
            Some(&token),
            json!({ "value": foreign.value() }),
        ))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.backups.count(), 1);
}

#[tokio::test]
async fn test_missing_backup_is_not_found() {
    let app = TestApp::new();
    let token = app.sign_up("frog", "kero").await;

    let response = app
        .send(json_request(
            Method::POST,
            "/backup/download",
            Some(&token),
            json!({ "value": 42 }),
        ))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_own_backup() {
    let app = TestApp::new();
    let token = app.sign_up("frog", "kero").await;
    let id = app.backups.insert(UserId::new(1), b"mine");

    let response = app
        .send(json_request(
            Method::DELETE,
            "/backup/delete",
            Some(&token),
            json!({ "value": id.value() }),
        ))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.backups.count(), 0);
}

#[tokio::test]
async fn test_backup_routes_require_auth() {
    let app = TestApp::new();
    let requests = [
        empty_request(Method::GET, "/backup/allmeta", None),
        json_request(Method::POST, "/backup/download", None, json!({ "value": 1 })),
        json_request(Method::DELETE, "/backup/delete", None, json!({ "value": 1 })),
        empty_request(Method::POST, "/backup/save", Some("forged")),
    ];
    for request in requests {
        let response = app.send(request).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
}
