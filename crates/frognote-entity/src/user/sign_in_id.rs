//! Sign-in identifier value object.

use std::fmt;

use serde::{Deserialize, Serialize};

use frognote_core::error::AppError;

/// Maximum length of a sign-in id, in bytes.
pub const MAX_SIGN_IN_ID_LEN: usize = 30;

/// The name a user signs in with. Between 1 and 30 bytes long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SignInId(String);

impl SignInId {
    /// Validate and wrap a sign-in id.
    pub fn new(value: impl Into<String>) -> Result<Self, AppError> {
        let value = value.into();
        if value.is_empty() || value.len() > MAX_SIGN_IN_ID_LEN {
            return Err(AppError::validation(
                "'signInId' must be between 1 to 30 characters",
            ));
        }
        Ok(Self(value))
    }

    /// Borrow the raw value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SignInId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SignInId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SignInId> for String {
    fn from(id: SignInId) -> Self {
        id.0
    }
}
