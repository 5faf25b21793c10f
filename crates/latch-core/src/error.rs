//! Error types for the login flow

use std::time::Duration;

use thiserror::Error;

use crate::alert::Alert;
use crate::messages::{Locale, Text};

/// Result type alias for login operations
pub type Result<T> = std::result::Result<T, LoginError>;

/// Every way a login attempt can end without authenticating the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// A required field is empty or whitespace-only
    #[error("Username and password are required")]
    Validation,

    /// The HTTP exchange itself could not be completed
    #[error("Could not reach the authentication server: {0}")]
    Transport(String),

    /// The endpoint did not answer within the configured limit
    #[error("Authentication request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The server answered but did not accept the credentials
    #[error("Authentication rejected: {}", .message.as_deref().unwrap_or("no reason given"))]
    AuthRejected {
        /// Server-supplied explanation, if any
        message: Option<String>,
    },

    /// No biometric hardware, or nothing enrolled
    #[error("Biometric authentication is not available")]
    BiometricUnavailable,

    /// The device prompt completed without a match
    #[error("Biometric authentication failed")]
    BiometricRejected,
}

/// Payload-free discriminant of [`LoginError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginErrorKind {
    Validation,
    Transport,
    Timeout,
    AuthRejected,
    BiometricUnavailable,
    BiometricRejected,
}

impl LoginError {
    /// Get the error kind
    pub fn kind(&self) -> LoginErrorKind {
        match self {
            LoginError::Validation => LoginErrorKind::Validation,
            LoginError::Transport(_) => LoginErrorKind::Transport,
            LoginError::Timeout(_) => LoginErrorKind::Timeout,
            LoginError::AuthRejected { .. } => LoginErrorKind::AuthRejected,
            LoginError::BiometricUnavailable => LoginErrorKind::BiometricUnavailable,
            LoginError::BiometricRejected => LoginErrorKind::BiometricRejected,
        }
    }

    /// Translate the error into the alert shown to the user.
    ///
    /// Transport failures and timeouts share the generic connectivity
    /// message; the server's own wording is used for rejections when present.
    pub fn alert(&self, locale: Locale) -> Alert {
        let message = match self {
            LoginError::Validation => locale.text(Text::MissingFields).to_string(),
            LoginError::Transport(_) | LoginError::Timeout(_) => {
                locale.text(Text::ConnectionFailed).to_string()
            }
            LoginError::AuthRejected {
                message: Some(message),
            } => message.clone(),
            LoginError::AuthRejected { message: None } => {
                locale.text(Text::CredentialsRejected).to_string()
            }
            LoginError::BiometricUnavailable => {
                locale.text(Text::BiometricUnavailable).to_string()
            }
            LoginError::BiometricRejected => locale.text(Text::BiometricFailed).to_string(),
        };

        Alert::new(locale.text(Text::ErrorTitle), message)
    }
}
