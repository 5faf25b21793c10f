//! Latch Core Library
//!
//! The login flow behind the Latch terminal client. A [`LoginController`]
//! owns the form state and runs one of two authentication strategies:
//!
//! - **Password**: credentials are validated locally and sent to a remote
//!   HTTP endpoint as JSON.
//! - **Biometric**: the device's biometric capability provider is queried and,
//!   when available, asked to prompt the user.
//!
//! Either strategy feeds a single [`AuthOutcome`], which the
//! [`NavigationShell`] turns into a screen transition. Failures are delivered
//! to an [`AlertSink`] as user-facing text and never propagate further.

pub mod alert;
pub mod api;
pub mod biometric;
pub mod config;
pub mod controller;
pub mod credentials;
pub mod error;
pub mod messages;
pub mod navigation;

pub use alert::{Alert, AlertLog, AlertSink};
pub use api::{AuthClient, HttpAuthClient, LoginResult};
pub use biometric::{
    BiometricModality, BiometricOutcome, BiometricProvider, FprintdProvider, NoBiometrics,
    ScriptedBiometrics,
};
pub use config::{BiometricBackend, ClientConfig, ConfigError};
pub use controller::{AuthOutcome, AuthStrategy, LoginController, LoginState};
pub use credentials::{validate_inputs, Credentials};
pub use error::{LoginError, LoginErrorKind, Result};
pub use messages::{Locale, Text};
pub use navigation::{NavigationShell, Screen};
