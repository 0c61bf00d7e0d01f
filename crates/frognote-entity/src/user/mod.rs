//! User domain entities.

pub mod model;
pub mod sign_in_id;

pub use model::{User, validate_password, validate_screen_name};
pub use sign_in_id::SignInId;
