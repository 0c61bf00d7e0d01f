//! In-memory mapping from session token to user.
//!
//! Sessions live only as long as the process. Tokens are random UUIDv4
//! strings with no embedded structure.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use frognote_core::types::UserId;

/// Concurrent registry of live session tokens.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, UserId>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Issue a fresh token bound to `user_id`.
    ///
    /// The uniqueness check and the insert happen under the same shard lock,
    /// so the returned token is already resolvable.
    pub fn issue(&self, user_id: UserId) -> String {
        loop {
            let token = Uuid::new_v4().to_string();
            match self.sessions.entry(token) {
                Entry::Vacant(slot) => {
                    let token = slot.key().clone();
                    slot.insert(user_id);
                    tracing::debug!(user_id = %user_id, "Issued session token");
                    return token;
                }
                Entry::Occupied(_) => {
                    tracing::warn!("Session token collision, regenerating");
                }
            }
        }
    }

    /// Look up the user bound to `token`.
    pub fn resolve(&self, token: &str) -> Option<UserId> {
        self.sessions.get(token).map(|entry| *entry.value())
    }

    /// Drop `token`. Unknown tokens are ignored.
    pub fn revoke(&self, token: &str) {
        if let Some((_, user_id)) = self.sessions.remove(token) {
            tracing::debug!(user_id = %user_id, "Revoked session token");
        }
    }

    /// Drop every token bound to `user_id` and return how many were live.
    pub fn revoke_user(&self, user_id: UserId) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, owner| *owner != user_id);
        let revoked = before.saturating_sub(self.sessions.len());
        tracing::debug!(user_id = %user_id, revoked, "Revoked user sessions");
        revoked
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` when no session is live.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
