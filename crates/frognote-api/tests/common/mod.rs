//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use frognote_api::{AppState, Route, build_app, build_app_with_routes};
use frognote_core::config::AppConfig;
use frognote_core::error::AppError;
use frognote_core::result::AppResult;
use frognote_core::types::{BackupId, UserId};
use frognote_database::repositories::{BackupStore, UserStore};
use frognote_entity::backup::{Backup, BackupMeta};
use frognote_entity::user::{SignInId, User};

/// In-memory [`UserStore`] with a unique sign-in id constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    next_id: Mutex<i64>,
}

impl InMemoryUserStore {
    pub fn get(&self, id: UserId) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(
        &self,
        sign_in_id: &SignInId,
        password_digest: &str,
        screen_name: &str,
    ) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| &u.sign_in_id == sign_in_id) {
            return Err(AppError::conflict("signInId is already taken"));
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let user = User::new(
            UserId::new(*next_id),
            screen_name,
            sign_in_id.clone(),
            password_digest,
        )?;
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.id != user.id && u.sign_in_id == user.sign_in_id)
        {
            return Err(AppError::conflict("signInId is already taken"));
        }
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::not_found("user"))?;
        *slot = user.clone();
        Ok(())
    }

    async fn find_by_sign_in_id(&self, sign_in_id: &SignInId) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.sign_in_id == sign_in_id)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn delete(&self, sign_in_id: &SignInId) -> AppResult<()> {
        self.users
            .lock()
            .unwrap()
            .retain(|u| &u.sign_in_id != sign_in_id);
        Ok(())
    }
}

/// In-memory [`BackupStore`].
#[derive(Debug, Default)]
pub struct InMemoryBackupStore {
    backups: Mutex<Vec<Backup>>,
}

impl InMemoryBackupStore {
    pub fn insert(&self, user_id: UserId, blob: &[u8]) -> BackupId {
        let mut backups = self.backups.lock().unwrap();
        let id = BackupId::new(backups.len() as i64 + 1);
        backups.push(Backup::new(id, user_id, saved_at(), blob.to_vec()));
        id
    }

    pub fn count(&self) -> usize {
        self.backups.lock().unwrap().len()
    }
}

pub fn saved_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

#[async_trait]
impl BackupStore for InMemoryBackupStore {
    async fn create(&self, user_id: UserId, blob: &[u8]) -> AppResult<()> {
        self.insert(user_id, blob);
        Ok(())
    }

    async fn find_metas(&self, user_id: UserId) -> AppResult<Vec<BackupMeta>> {
        Ok(self
            .backups
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(Backup::meta)
            .collect())
    }

    async fn find_by_id(&self, backup_id: BackupId) -> AppResult<Option<Backup>> {
        Ok(self
            .backups
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.backup_id == backup_id)
            .cloned())
    }

    async fn delete_by_id(&self, backup_id: BackupId) -> AppResult<()> {
        self.backups
            .lock()
            .unwrap()
            .retain(|b| b.backup_id != backup_id);
        Ok(())
    }
}

/// Status, headers and collected body of a test response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

/// Application under test with in-memory stores and temporary log dirs.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub users: Arc<InMemoryUserStore>,
    pub backups: Arc<InMemoryBackupStore>,
    logs: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(None, |_| {})
    }

    pub fn with_routes(routes: Vec<Route>) -> Self {
        Self::build(Some(routes), |_| {})
    }

    pub fn with_config(configure: impl FnOnce(&mut AppConfig)) -> Self {
        Self::build(None, configure)
    }

    fn build(routes: Option<Vec<Route>>, configure: impl FnOnce(&mut AppConfig)) -> Self {
        let logs = tempfile::tempdir().expect("temp dir");
        let mut config = AppConfig::default();
        config.logging.access_log_dir = logs.path().join("AccessLogs").display().to_string();
        config.logging.error_log_dir = logs.path().join("ErrorLogs").display().to_string();
        configure(&mut config);

        let users = Arc::new(InMemoryUserStore::default());
        let backups = Arc::new(InMemoryBackupStore::default());
        let state = AppState::new(
            config,
            Arc::clone(&users) as Arc<dyn UserStore>,
            Arc::clone(&backups) as Arc<dyn BackupStore>,
        )
        .expect("state");

        let router = match routes {
            Some(routes) => build_app_with_routes(state.clone(), routes),
            None => build_app(state.clone()),
        };

        Self {
            router,
            state,
            users,
            backups,
            logs,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Create an account and return a live token for it.
    pub async fn sign_up(&self, sign_in_id: &str, password: &str) -> String {
        let created = self
            .send(json_request(
                Method::POST,
                "/user/create",
                None,
                serde_json::json!({
                    "signInId": sign_in_id,
                    "password": password,
                    "screenName": "Frog",
                }),
            ))
            .await;
        assert_eq!(created.status, StatusCode::OK, "{}", created.text());

        let auth = self
            .send(json_request(
                Method::POST,
                "/user/auth",
                None,
                serde_json::json!({ "signInId": sign_in_id, "password": password }),
            ))
            .await;
        assert_eq!(auth.status, StatusCode::OK, "{}", auth.text());
        auth.text()
    }

    pub fn access_log_lines(&self) -> Vec<String> {
        log_lines(&self.logs.path().join("AccessLogs"))
    }

    pub fn error_log_lines(&self) -> Vec<String> {
        log_lines(&self.logs.path().join("ErrorLogs"))
    }
}

fn log_lines(dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let Ok(entries) = fs::read_dir(dir) else {
        return lines;
    };
    for entry in entries {
        let content = fs::read_to_string(entry.unwrap().path()).unwrap();
        lines.extend(content.lines().skip(1).map(str::to_owned));
    }
    lines
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, token);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn multipart_request(uri: &str, token: &str, field: &str, data: &[u8]) -> Request<Body> {
    let boundary = "frognote-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"backup.bin\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, token)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}
