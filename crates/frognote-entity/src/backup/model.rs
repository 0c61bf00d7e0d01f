//! Backup entity model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use frognote_core::types::{BackupId, UserId};

/// A stored backup blob owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Unique backup identifier.
    pub backup_id: BackupId,
    /// The owning user.
    pub user_id: UserId,
    /// Opaque backup payload.
    #[serde(skip)]
    pub backup: Vec<u8>,
    /// When the store accepted the backup.
    #[serde(with = "saved_at_format")]
    pub saved_at: NaiveDateTime,
}

impl Backup {
    /// Build a backup from its stored parts.
    pub fn new(
        backup_id: BackupId,
        user_id: UserId,
        saved_at: NaiveDateTime,
        backup: Vec<u8>,
    ) -> Self {
        Self {
            backup_id,
            user_id,
            backup,
            saved_at,
        }
    }

    /// Check whether `user_id` owns this backup.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Drop the payload, keeping the listing fields.
    pub fn meta(&self) -> BackupMeta {
        BackupMeta {
            backup_id: self.backup_id,
            saved_at: self.saved_at,
        }
    }
}

/// Listing entry for a backup, without the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupMeta {
    /// Unique backup identifier.
    pub backup_id: BackupId,
    /// When the store accepted the backup.
    #[serde(with = "saved_at_format")]
    pub saved_at: NaiveDateTime,
}

/// `savedAt` is rendered as `YYYY-MM-DD HH:MM:SS`.
mod saved_at_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
