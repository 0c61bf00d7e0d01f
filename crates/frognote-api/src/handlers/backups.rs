//! Backup blob handlers.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart};
use axum::http::{Method, Request};
use bytes::Bytes;
use serde::Deserialize;

use frognote_core::error::{AppError, ErrorKind};
use frognote_core::result::AppResult;
use frognote_core::types::{BackupId, UserId};
use frognote_entity::backup::Backup;

use super::{finish, read_json, require_json, require_method, require_user};
use crate::dispatch::Route;
use crate::error::Reply;
use crate::logger::Logger;
use crate::state::AppState;

/// Multipart field carrying the uploaded blob.
pub const BACKUP_FIELD: &str = "backup";

/// `{"value": <backup id>}` body of download and delete.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BackupIdBody {
    pub value: BackupId,
}

/// Routes served by this module.
pub fn routes() -> Vec<Route> {
    vec![
        Route::new("/backup/save", save),
        Route::new("/backup/delete", delete),
        Route::new("/backup/allmeta", all_meta),
        Route::new("/backup/download", download),
    ]
}

/// `POST /backup/save` with a multipart `backup` file field.
pub async fn save(state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply {
    finish(save_backup(&state, request).await, &logger, "save backup").await
}

async fn save_backup(state: &AppState, request: Request<Body>) -> AppResult<Reply> {
    let user_id = require_user(state, &request)?;
    require_method(&request, Method::POST)?;

    let blob = read_backup_field(request).await?;
    state.backups.create(user_id, &blob).await?;
    Ok(Reply::empty())
}

async fn read_backup_field(request: Request<Body>) -> AppResult<Bytes> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| AppError::validation(format!("expected multipart/form-data: {e}")))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(BACKUP_FIELD) {
            return field.bytes().await.map_err(multipart_error);
        }
    }
    Err(AppError::validation("missing 'backup' field"))
}

/// Oversized or malformed uploads are the client's fault.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status().is_client_error() {
        AppError::validation(format!("Could not read multipart body: {}", err.body_text()))
    } else {
        AppError::with_source(ErrorKind::Storage, "Could not read multipart body", err)
    }
}

/// `GET /backup/allmeta`: list the caller's backups.
pub async fn all_meta(state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply {
    finish(list_metas(&state, request).await, &logger, "list backups").await
}

async fn list_metas(state: &AppState, request: Request<Body>) -> AppResult<Reply> {
    let user_id = require_user(state, &request)?;
    require_method(&request, Method::GET)?;

    let metas = state.backups.find_metas(user_id).await?;
    Reply::json(&metas)
}

/// `POST /backup/download`: return one blob.
pub async fn download(state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply {
    finish(download_backup(&state, request).await, &logger, "download backup").await
}

async fn download_backup(state: &AppState, request: Request<Body>) -> AppResult<Reply> {
    let user_id = require_user(state, &request)?;
    require_json(&request, Method::POST)?;
    let body: BackupIdBody = read_json(state, request).await?;

    let backup = find_owned(state, body.value, user_id).await?;
    Ok(Reply::binary(backup.backup))
}

/// `DELETE /backup/delete`
pub async fn delete(state: AppState, request: Request<Body>, logger: Arc<Logger>) -> Reply {
    finish(delete_backup(&state, request).await, &logger, "delete backup").await
}

async fn delete_backup(state: &AppState, request: Request<Body>) -> AppResult<Reply> {
    let user_id = require_user(state, &request)?;
    require_json(&request, Method::DELETE)?;
    let body: BackupIdBody = read_json(state, request).await?;

    find_owned(state, body.value, user_id).await?;
    state.backups.delete_by_id(body.value).await?;
    Ok(Reply::empty())
}

/// Load a backup, treating one owned by someone else as unauthorized.
async fn find_owned(state: &AppState, backup_id: BackupId, user_id: UserId) -> AppResult<Backup> {
    let backup = state
        .backups
        .find_by_id(backup_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Backup {backup_id} not found")))?;

    if !backup.is_owned_by(user_id) {
        tracing::warn!(backup_id = %backup_id, user_id = %user_id, "Backup owned by another user");
        return Err(AppError::authentication("Unauthorized"));
    }
    Ok(backup)
}
