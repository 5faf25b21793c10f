//! User-facing alert channel

use std::sync::Mutex;

/// A modal message the user has to dismiss
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Destination for alerts raised by the login flow
pub trait AlertSink: Send + Sync {
    /// Display an alert
    fn show(&self, alert: Alert);
}

/// Sink that records alerts in memory
///
/// Used by headless callers and tests to inspect what the user would have seen.
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts: Mutex<Vec<Alert>>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every alert shown so far
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }

    /// Most recent alert
    pub fn last(&self) -> Option<Alert> {
        self.alerts.lock().ok().and_then(|a| a.last().cloned())
    }

    pub fn len(&self) -> usize {
        self.alerts.lock().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AlertSink for AlertLog {
    fn show(&self, alert: Alert) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(alert);
        }
    }
}
