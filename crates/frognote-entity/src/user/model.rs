//! User entity model.

use serde::{Deserialize, Serialize};

use frognote_core::error::AppError;
use frognote_core::types::UserId;

use super::sign_in_id::SignInId;

/// Maximum length of a screen name, in bytes.
pub const MAX_SCREEN_NAME_LEN: usize = 30;
/// Maximum length of a stored password digest, in bytes.
pub const MAX_PASSWORD_LEN: usize = 64;

/// A registered FrogNote user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub sign_in_id: SignInId,
    /// Human-readable display name.
    pub screen_name: String,
    /// Password digest.
    pub password: String,
}

impl User {
    /// Build a user, validating screen name (1 to 30 bytes) and password
    /// (1 to 64 bytes).
    pub fn new(
        id: UserId,
        screen_name: impl Into<String>,
        sign_in_id: SignInId,
        password: impl Into<String>,
    ) -> Result<Self, AppError> {
        let screen_name = screen_name.into();
        let password = password.into();
        validate_screen_name(&screen_name)?;
        validate_password(&password)?;

        Ok(Self {
            id,
            sign_in_id,
            screen_name,
            password,
        })
    }
}

/// Check that a screen name is 1 to 30 bytes long.
pub fn validate_screen_name(screen_name: &str) -> Result<(), AppError> {
    if screen_name.is_empty() || screen_name.len() > MAX_SCREEN_NAME_LEN {
        return Err(AppError::validation(
            "'screenName' must be between 1 to 30 characters",
        ));
    }
    Ok(())
}

/// Check that a password (plaintext or digest) is 1 to 64 bytes long.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() || password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(
            "'password' must be between 1 to 64 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use frognote_core::error::ErrorKind;

    const NAME_30: &str = "123456789abcdef123456789abcdef";
    const NAME_31: &str = "123456789abcdef123456789abcdef1";
    const PASS_64: &str = "1234567812345678123456781234567812345678123456781234567812345678";
    const PASS_65: &str = "12345678123456781234567812345678123456781234567812345678123456781";

    fn sign_in_id() -> SignInId {
        SignInId::new("aiueo").unwrap()
    }

    #[test]
    fn test_valid_boundaries() {
        for name in ["a", NAME_30] {
            for pass in ["a", PASS_64] {
                let user = User::new(UserId::new(1), name, sign_in_id(), pass);
                assert!(user.is_ok(), "name={name} pass={pass}");
            }
        }
    }

    #[test]
    fn test_invalid_screen_name() {
        for name in ["", NAME_31] {
            let err = User::new(UserId::new(1), name, sign_in_id(), "pw").unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert!(err.message.contains("screenName"));
        }
    }

    #[test]
    fn test_invalid_password() {
        for pass in ["", PASS_65] {
            let err = User::new(UserId::new(1), "frog", sign_in_id(), pass).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert!(err.message.contains("password"));
        }
    }
}
