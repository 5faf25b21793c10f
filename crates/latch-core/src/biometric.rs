//! Biometric capability providers
//!
//! The login flow only needs three questions answered by the device: is there
//! biometric hardware, which modalities are enrolled, and did the user pass a
//! prompt. [`BiometricProvider`] is that seam; the hardware driver behind it is
//! opaque.

use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

/// Device-specific authentication mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiometricModality {
    Fingerprint,
    FacialRecognition,
    Iris,
}

/// Result of a biometric prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiometricOutcome {
    pub success: bool,
}

/// Biometric capability of the device
#[async_trait]
pub trait BiometricProvider: Send + Sync {
    /// Whether biometric hardware is present
    async fn has_hardware(&self) -> bool;

    /// Modalities the device can authenticate with right now
    async fn supported_types(&self) -> Vec<BiometricModality>;

    /// Prompt the user and wait for the verdict
    async fn authenticate(&self, prompt: &str) -> BiometricOutcome;
}

/// Provider for machines without biometric hardware
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBiometrics;

#[async_trait]
impl BiometricProvider for NoBiometrics {
    async fn has_hardware(&self) -> bool {
        false
    }

    async fn supported_types(&self) -> Vec<BiometricModality> {
        Vec::new()
    }

    async fn authenticate(&self, _prompt: &str) -> BiometricOutcome {
        BiometricOutcome { success: false }
    }
}

/// Fingerprint readers managed by the Linux `fprintd` daemon
///
/// Talks to the daemon through its command-line tools. A missing tool or a
/// daemon without devices reads as "no hardware".
#[derive(Debug, Clone)]
pub struct FprintdProvider {
    user: String,
}

impl FprintdProvider {
    /// Provider for a specific account
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    /// Provider for the account running this process
    pub fn for_current_user() -> Self {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("LOGNAME"))
            .unwrap_or_else(|_| "root".to_string());
        Self::new(user)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Run `fprintd-list` and return its stdout if it succeeded
    async fn list(&self) -> Option<String> {
        let output = Command::new("fprintd-list")
            .arg(&self.user)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| tracing::debug!("fprintd-list unavailable: {}", e))
            .ok()?;

        if !output.status.success() {
            tracing::debug!(status = %output.status, "fprintd-list reported no devices");
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl BiometricProvider for FprintdProvider {
    async fn has_hardware(&self) -> bool {
        self.list().await.is_some_and(|out| lists_device(&out))
    }

    async fn supported_types(&self) -> Vec<BiometricModality> {
        match self.list().await {
            Some(out) if has_enrolled_finger(&out) => vec![BiometricModality::Fingerprint],
            _ => Vec::new(),
        }
    }

    async fn authenticate(&self, prompt: &str) -> BiometricOutcome {
        tracing::info!(user = %self.user, "{}", prompt);

        let output = Command::new("fprintd-verify")
            .arg(&self.user)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        let success = match output {
            Ok(output) => {
                output.status.success()
                    && verify_matched(&String::from_utf8_lossy(&output.stdout))
            }
            Err(e) => {
                tracing::warn!("Failed to run fprintd-verify: {}", e);
                false
            }
        };

        BiometricOutcome { success }
    }
}

/// `fprintd-list` prints "Using device ..." once it has claimed a reader
fn lists_device(output: &str) -> bool {
    output.lines().any(|line| {
        line.starts_with("Using device")
            || (line.starts_with("Fingerprints for user") && line.contains(" on "))
    })
}

/// Enrolled fingers are listed as ` - #0: right-index-finger`
fn has_enrolled_finger(output: &str) -> bool {
    output.lines().any(|line| line.trim_start().starts_with("- #"))
}

fn verify_matched(output: &str) -> bool {
    output
        .lines()
        .any(|line| line.contains("verify-match") && !line.contains("verify-no-match"))
}

/// Provider with fixed answers
///
/// Stands in for real hardware in tests and demos, and counts how often the
/// prompt was raised.
#[derive(Debug, Default)]
pub struct ScriptedBiometrics {
    hardware: bool,
    modalities: Vec<BiometricModality>,
    accept: bool,
    prompts: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedBiometrics {
    /// Hardware present with a fingerprint enrolled
    pub fn enrolled(accept: bool) -> Self {
        Self {
            hardware: true,
            modalities: vec![BiometricModality::Fingerprint],
            accept,
            ..Self::default()
        }
    }

    /// Hardware present but nothing enrolled
    pub fn not_enrolled() -> Self {
        Self {
            hardware: true,
            ..Self::default()
        }
    }

    /// No hardware at all
    pub fn absent() -> Self {
        Self::default()
    }

    /// Number of prompts raised so far
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    /// Text of the most recent prompt
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl BiometricProvider for ScriptedBiometrics {
    async fn has_hardware(&self) -> bool {
        self.hardware
    }

    async fn supported_types(&self) -> Vec<BiometricModality> {
        self.modalities.clone()
    }

    async fn authenticate(&self, prompt: &str) -> BiometricOutcome {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        BiometricOutcome {
            success: self.accept,
        }
    }
}
