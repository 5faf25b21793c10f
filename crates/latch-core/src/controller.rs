//! Login controller
//!
//! Owns the login form state and runs authentication attempts. The state lives
//! in a `watch` channel: the UI subscribes to it to render, and writes to it
//! only through the controller's setters.
//!
//! Both strategies end in [`LoginController::authenticate`], which turns the
//! result into one [`AuthOutcome`] and raises the alert for any failure.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use crate::alert::AlertSink;
use crate::api::{AuthClient, HttpAuthClient};
use crate::biometric::BiometricProvider;
use crate::config::{ClientConfig, ConfigError};
use crate::credentials::{validate_inputs, Credentials};
use crate::error::{LoginError, LoginErrorKind, Result};
use crate::messages::{Locale, Text};

/// Observable form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub credentials: Credentials,
    /// True only while a password login request is outstanding
    pub loading: bool,
}

/// How the user asked to authenticate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStrategy {
    Password,
    Biometric,
}

/// What became of an authentication attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The user is in
    Authenticated(AuthStrategy),
    /// The attempt failed and the user has been alerted
    Failed(LoginErrorKind),
    /// A password login was already in flight; nothing was done
    Ignored,
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated(_))
    }
}

/// Result of trying to start a password login
enum Admission {
    Busy,
    Invalid(LoginError),
    Admitted(Credentials),
}

/// Clears the loading flag when dropped
struct LoadingGuard<'a> {
    state: &'a watch::Sender<LoginState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|state| state.loading = false);
        debug!("Loading flag cleared");
    }
}

/// Drives password and biometric login
pub struct LoginController {
    state: watch::Sender<LoginState>,
    auth_client: Arc<dyn AuthClient>,
    biometrics: Arc<dyn BiometricProvider>,
    alerts: Arc<dyn AlertSink>,
    locale: Locale,
    request_timeout: Option<Duration>,
}

impl LoginController {
    /// Create a controller with no request time limit and English text
    pub fn new(
        auth_client: Arc<dyn AuthClient>,
        biometrics: Arc<dyn BiometricProvider>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        let (state, _) = watch::channel(LoginState::default());
        Self {
            state,
            auth_client,
            biometrics,
            alerts,
            locale: Locale::default(),
            request_timeout: None,
        }
    }

    /// Build the HTTP client and biometric provider described by `config`
    pub fn from_config(
        config: &ClientConfig,
        alerts: Arc<dyn AlertSink>,
    ) -> std::result::Result<Self, ConfigError> {
        let client = HttpAuthClient::new(&config.endpoint)?;
        let controller = Self::new(Arc::new(client), config.biometrics.provider(), alerts)
            .with_locale(config.locale)
            .with_request_timeout(config.request_timeout());
        Ok(controller)
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Bound password login requests; `None` waits for the endpoint forever
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> LoginState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn set_username(&self, username: impl Into<String>) {
        let username = username.into();
        self.state
            .send_modify(|state| state.credentials.username = username);
    }

    /// Replace the password, wiping the previous value
    pub fn set_password(&self, password: impl Into<String>) {
        let password = password.into();
        self.state.send_modify(|state| {
            state.credentials.password.zeroize();
            state.credentials.password = password;
        });
    }

    /// Edit the username in place
    pub fn edit_username(&self, edit: impl FnOnce(&mut String)) {
        self.state
            .send_modify(|state| edit(&mut state.credentials.username));
    }

    /// Edit the password in place.
    ///
    /// The edit runs on a fresh buffer with room to grow, so the old buffer
    /// is wiped instead of being left behind by a reallocation.
    pub fn edit_password(&self, edit: impl FnOnce(&mut String)) {
        self.state.send_modify(|state| {
            let current = &mut state.credentials.password;
            let mut next = String::with_capacity(current.len() + 4);
            next.push_str(current);
            edit(&mut next);
            current.zeroize();
            *current = next;
        });
    }

    /// Check the current form contents
    pub fn validate_inputs(&self) -> Result<()> {
        validate_inputs(&self.state.borrow().credentials)
    }

    /// Run one authentication attempt and settle it.
    ///
    /// Failures are shown through the alert sink before returning; the
    /// returned outcome tells the caller whether to navigate.
    pub async fn authenticate(&self, strategy: AuthStrategy) -> AuthOutcome {
        let result = match strategy {
            AuthStrategy::Password => match self.login_with_api().await {
                Some(result) => result,
                None => {
                    debug!("Password login already in flight, ignoring submission");
                    return AuthOutcome::Ignored;
                }
            },
            AuthStrategy::Biometric => self.login_with_biometrics().await,
        };

        match result {
            Ok(()) => {
                info!(?strategy, "Authentication succeeded");
                AuthOutcome::Authenticated(strategy)
            }
            Err(error) => {
                warn!(?strategy, %error, "Authentication failed");
                self.alerts.show(error.alert(self.locale));
                AuthOutcome::Failed(error.kind())
            }
        }
    }

    /// Send the form's credentials to the endpoint.
    ///
    /// Returns `None` without doing anything if a request is already
    /// outstanding. Otherwise the loading flag is raised for exactly the
    /// duration of the request and cleared on every way out, including
    /// cancellation of this future.
    pub async fn login_with_api(&self) -> Option<Result<()>> {
        let credentials = match self.admit_password_attempt() {
            Admission::Busy => return None,
            Admission::Invalid(error) => return Some(Err(error)),
            Admission::Admitted(credentials) => credentials,
        };
        let _loading = LoadingGuard { state: &self.state };

        debug!(username = %credentials.username, "Submitting credentials");
        let request = self.auth_client.login(&credentials);

        let result = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .unwrap_or(Err(LoginError::Timeout(limit))),
            None => request.await,
        };

        Some(result)
    }

    /// Authenticate with the device's biometrics.
    ///
    /// Never touches the credentials or the loading flag. The prompt is only
    /// raised when hardware is present and at least one modality is enrolled.
    pub async fn login_with_biometrics(&self) -> Result<()> {
        let has_hardware = self.biometrics.has_hardware().await;
        let modalities = self.biometrics.supported_types().await;

        if !has_hardware || modalities.is_empty() {
            debug!(has_hardware, ?modalities, "Biometrics unavailable");
            return Err(LoginError::BiometricUnavailable);
        }

        let outcome = self
            .biometrics
            .authenticate(self.locale.text(Text::BiometricPrompt))
            .await;

        if outcome.success {
            Ok(())
        } else {
            Err(LoginError::BiometricRejected)
        }
    }

    /// Check busy, validate and raise the loading flag in one state update
    fn admit_password_attempt(&self) -> Admission {
        let mut admission = Admission::Busy;
        self.state.send_if_modified(|state| {
            if state.loading {
                return false;
            }
            match validate_inputs(&state.credentials) {
                Ok(()) => {
                    state.loading = true;
                    admission = Admission::Admitted(state.credentials.clone());
                    true
                }
                Err(error) => {
                    admission = Admission::Invalid(error);
                    false
                }
            }
        });
        admission
    }
}
