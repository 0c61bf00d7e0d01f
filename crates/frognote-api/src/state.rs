//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use frognote_auth::{AuthorizationGate, CredentialHasher, SessionRegistry};
use frognote_core::config::AppConfig;
use frognote_core::result::AppResult;
use frognote_database::repositories::{BackupStore, UserStore};

use crate::logger::Logger;
use crate::middleware::cors::CorsHeaders;

/// Shared dependencies handed to every route.
///
/// All fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// User persistence
    pub users: Arc<dyn UserStore>,
    /// Backup persistence
    pub backups: Arc<dyn BackupStore>,
    /// Live session tokens
    pub sessions: Arc<SessionRegistry>,
    /// Token to user resolution
    pub gate: AuthorizationGate,
    /// Password digests
    pub hasher: CredentialHasher,
    /// Access and error log files
    pub logger: Arc<Logger>,
    /// Precomputed CORS header values
    pub cors: CorsHeaders,
}

impl AppState {
    /// Wire the state from configuration and the two stores.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        backups: Arc<dyn BackupStore>,
    ) -> AppResult<Self> {
        let cors = CorsHeaders::from_config(&config.server.cors)?;
        let logger = Arc::new(Logger::from_config(&config.logging));
        let sessions = Arc::new(SessionRegistry::new());
        let gate = AuthorizationGate::new(Arc::clone(&sessions));

        Ok(Self {
            config: Arc::new(config),
            users,
            backups,
            sessions,
            gate,
            hasher: CredentialHasher::new(),
            logger,
            cors,
        })
    }
}
