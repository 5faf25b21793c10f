//! Navigation shell for screen transitions

use crate::controller::AuthOutcome;
use crate::messages::{Locale, Text};

/// Screens the client can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    /// Login form
    #[default]
    Login,
    /// Placeholder shown after authenticating
    Main,
}

/// Two-screen navigation stack
///
/// Starts on [`Screen::Login`]. The only forward transition is Login → Main on
/// a successful authentication; `back` returns from Main to Login. The stack
/// never holds more than one screen beneath the current one.
#[derive(Debug, Clone)]
pub struct NavigationShell {
    /// Navigation history stack, bottom is always Login
    history: Vec<Screen>,
}

impl NavigationShell {
    /// Create a shell on the login screen
    pub fn new() -> Self {
        Self {
            history: vec![Screen::Login],
        }
    }

    /// Get the current screen
    pub fn current(&self) -> Screen {
        self.history.last().copied().unwrap_or_default()
    }

    /// Apply the outcome of an authentication attempt.
    ///
    /// Returns true if the shell moved to the main screen.
    pub fn apply(&mut self, outcome: AuthOutcome) -> bool {
        if !outcome.is_authenticated() {
            return false;
        }

        if self.current() != Screen::Login {
            tracing::debug!(?outcome, "Already past the login screen, ignoring outcome");
            return false;
        }

        self.history.push(Screen::Main);
        tracing::info!("Navigated to main screen");
        true
    }

    /// Go back to the previous screen
    pub fn back(&mut self) -> Option<Screen> {
        if !self.can_go_back() {
            return None;
        }
        self.history.pop();
        tracing::debug!(screen = ?self.current(), "Navigated back");
        Some(self.current())
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// Screens beneath the current one
    pub fn depth(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Get title for a screen
    pub fn screen_title(screen: Screen, locale: Locale) -> &'static str {
        match screen {
            Screen::Login => locale.text(Text::LoginScreenName),
            Screen::Main => locale.text(Text::MainScreenName),
        }
    }

    /// Get the breadcrumb trail
    pub fn breadcrumb(&self, locale: Locale) -> Vec<&'static str> {
        self.history
            .iter()
            .map(|screen| Self::screen_title(*screen, locale))
            .collect()
    }
}

impl Default for NavigationShell {
    fn default() -> Self {
        Self::new()
    }
}
