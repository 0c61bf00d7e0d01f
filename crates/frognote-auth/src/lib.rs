//! # frognote-auth
//!
//! Authentication primitives for FrogNote.
//!
//! ## Modules
//!
//! - `password`: iterated SHA-256 credential digests
//! - `session`: in-memory token registry
//! - `gate`: per-request bearer token resolution

pub mod gate;
pub mod password;
pub mod session;

pub use gate::AuthorizationGate;
pub use password::CredentialHasher;
pub use session::SessionRegistry;
