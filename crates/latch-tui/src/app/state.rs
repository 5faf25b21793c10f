//! Application state

use std::collections::VecDeque;

use latch_core::{Alert, Locale, LoginState, NavigationShell, Screen};

/// Focusable controls on the login screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Username,
    Password,
    Submit,
    Biometric,
}

impl Focus {
    const ORDER: [Focus; 4] = [
        Focus::Username,
        Focus::Password,
        Focus::Submit,
        Focus::Biometric,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next control, wrapping around
    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// Previous control, wrapping around
    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Whether this control is a text field
    pub fn is_field(self) -> bool {
        matches!(self, Focus::Username | Focus::Password)
    }
}

/// Application state
pub struct AppState {
    /// Screen stack
    pub shell: NavigationShell,

    /// Focused login control
    pub focus: Focus,

    /// Latest copy of the controller's form state
    pub login: LoginState,

    /// Alerts waiting to be dismissed, oldest first
    pub alerts: VecDeque<Alert>,

    /// A biometric prompt is waiting on the user
    pub biometric_pending: bool,

    /// Display language
    pub locale: Locale,

    /// Tick counter for animations
    pub tick: u64,
}

impl AppState {
    /// Create new application state
    pub fn new(locale: Locale) -> Self {
        Self {
            shell: NavigationShell::new(),
            focus: Focus::default(),
            login: LoginState::default(),
            alerts: VecDeque::new(),
            biometric_pending: false,
            locale,
            tick: 0,
        }
    }

    pub fn current_screen(&self) -> Screen {
        self.shell.current()
    }

    /// Alert currently on screen
    pub fn alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    /// Whether an alert is blocking input
    pub fn has_alert(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// Dismiss the alert on screen
    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles() {
        let mut focus = Focus::Username;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Username);
        assert_eq!(Focus::Username.prev(), Focus::Biometric);
        assert_eq!(Focus::Password.next(), Focus::Submit);
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new(Locale::English);
        assert_eq!(state.current_screen(), Screen::Login);
        assert_eq!(state.focus, Focus::Username);
        assert!(!state.has_alert());
        assert!(!state.login.loading);
    }

    #[test]
    fn test_alerts_dismissed_in_order() {
        let mut state = AppState::new(Locale::English);
        state.alerts.push_back(Alert::new("Error", "first"));
        state.alerts.push_back(Alert::new("Error", "second"));

        assert_eq!(state.alert().unwrap().message, "first");
        state.dismiss_alert();
        assert_eq!(state.alert().unwrap().message, "second");
        state.dismiss_alert();
        assert!(!state.has_alert());
    }
}
