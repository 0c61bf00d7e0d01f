//! # frognote-database
//!
//! PostgreSQL connection management, migrations, and the user and backup
//! repositories behind the [`UserStore`] and [`BackupStore`] traits.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{BackupRepository, BackupStore, UserRepository, UserStore};
