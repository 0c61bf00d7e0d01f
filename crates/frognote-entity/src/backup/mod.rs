//! Backup domain entities.

pub mod model;

pub use model::{Backup, BackupMeta};
