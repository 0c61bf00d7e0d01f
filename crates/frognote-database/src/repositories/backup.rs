//! Backup repository implementation.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};

use frognote_core::error::{AppError, ErrorKind};
use frognote_core::result::AppResult;
use frognote_core::types::{BackupId, UserId};
use frognote_entity::backup::{Backup, BackupMeta};

use super::BackupStore;

#[derive(Debug, FromRow)]
struct BackupRow {
    id: BackupId,
    user_id: UserId,
    backup: Vec<u8>,
    saved_at: NaiveDateTime,
}

#[derive(Debug, FromRow)]
struct BackupMetaRow {
    id: BackupId,
    saved_at: NaiveDateTime,
}

/// PostgreSQL-backed [`BackupStore`].
#[derive(Debug, Clone)]
pub struct BackupRepository {
    pool: PgPool,
}

impl BackupRepository {
    /// Create a new backup repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BackupStore for BackupRepository {
    async fn create(&self, user_id: UserId, blob: &[u8]) -> AppResult<()> {
        sqlx::query("INSERT INTO backups (user_id, backup) VALUES ($1, $2)")
            .bind(user_id)
            .bind(blob)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save backup", e))?;

        tracing::debug!(user_id = %user_id, bytes = blob.len(), "Saved backup");
        Ok(())
    }

    async fn find_metas(&self, user_id: UserId) -> AppResult<Vec<BackupMeta>> {
        let rows = sqlx::query_as::<_, BackupMetaRow>(
            "SELECT id, saved_at FROM backups WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list backup metadata", e)
        })?;

        Ok(rows
            .into_iter()
            .map(|row| BackupMeta {
                backup_id: row.id,
                saved_at: row.saved_at,
            })
            .collect())
    }

    async fn find_by_id(&self, backup_id: BackupId) -> AppResult<Option<Backup>> {
        let row = sqlx::query_as::<_, BackupRow>(
            "SELECT id, user_id, backup, saved_at FROM backups WHERE id = $1",
        )
        .bind(backup_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find backup", e))?;

        Ok(row.map(|r| Backup::new(r.id, r.user_id, r.saved_at, r.backup)))
    }

    async fn delete_by_id(&self, backup_id: BackupId) -> AppResult<()> {
        sqlx::query("DELETE FROM backups WHERE id = $1")
            .bind(backup_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete backup", e)
            })?;
        Ok(())
    }
}
