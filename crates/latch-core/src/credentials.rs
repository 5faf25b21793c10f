//! Login form credentials and their validation

use std::fmt;

use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{LoginError, Result};

/// Username and password as typed into the login form
///
/// Serializes to the endpoint's request body. The password is wiped from
/// memory when the value is dropped and never shows up in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields contain something other than whitespace
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Check that both fields are filled in.
///
/// No length or format rules apply; whitespace-only counts as empty.
pub fn validate_inputs(credentials: &Credentials) -> Result<()> {
    if credentials.is_complete() {
        Ok(())
    } else {
        Err(LoginError::Validation)
    }
}
