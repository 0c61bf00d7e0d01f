//! Repository traits and their PostgreSQL implementations.
//!
//! Handlers depend on the [`UserStore`] and [`BackupStore`] traits so the
//! HTTP layer can be exercised against in-memory fakes.

pub mod backup;
pub mod user;

use async_trait::async_trait;

use frognote_core::result::AppResult;
use frognote_core::types::{BackupId, UserId};
use frognote_entity::backup::{Backup, BackupMeta};
use frognote_entity::user::{SignInId, User};

pub use backup::BackupRepository;
pub use user::UserRepository;

/// Persistence for user accounts. Passwords arrive already digested.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a user and return it with its assigned id.
    ///
    /// Fails with a conflict error when `sign_in_id` is already taken.
    async fn create(
        &self,
        sign_in_id: &SignInId,
        password_digest: &str,
        screen_name: &str,
    ) -> AppResult<User>;

    /// Overwrite sign-in id, password digest and screen name of `user.id`.
    async fn update(&self, user: &User) -> AppResult<()>;

    /// Look up a user by sign-in id.
    async fn find_by_sign_in_id(&self, sign_in_id: &SignInId) -> AppResult<Option<User>>;

    /// Look up a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Delete a user; their backups go with them.
    async fn delete(&self, sign_in_id: &SignInId) -> AppResult<()>;
}

/// Persistence for backup blobs.
#[async_trait]
pub trait BackupStore: Send + Sync + 'static {
    /// Store a new backup for `user_id`.
    async fn create(&self, user_id: UserId, blob: &[u8]) -> AppResult<()>;

    /// List a user's backups without payloads, ordered by id.
    async fn find_metas(&self, user_id: UserId) -> AppResult<Vec<BackupMeta>>;

    /// Fetch one backup with its payload.
    async fn find_by_id(&self, backup_id: BackupId) -> AppResult<Option<Backup>>;

    /// Delete one backup. Deleting a missing backup is not an error.
    async fn delete_by_id(&self, backup_id: BackupId) -> AppResult<()>;
}
