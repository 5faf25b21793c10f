//! Application state and event handling

mod events;
mod state;

pub use events::{ChannelAlerts, Event, EventHandler};
pub use state::{AppState, Focus};

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use latch_core::{AuthStrategy, ClientConfig, LoginController, LoginState, Screen};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::ui::{self, Theme};

/// Redraw interval, also drives the spinner
const TICK_RATE: Duration = Duration::from_millis(100);

/// Main application struct
pub struct App {
    /// Application state
    pub state: AppState,

    /// Visual theme
    pub theme: Theme,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Login flow shared with spawned attempts
    controller: Arc<LoginController>,

    /// Form state updates from the controller
    login_updates: watch::Receiver<LoginState>,

    /// Keyboard and background events
    events: EventHandler,

    /// Runtime that carries authentication attempts
    runtime: Handle,

    /// Last tick time
    last_tick: Instant,
}

impl App {
    /// Create the application from configuration
    pub fn new(config: &ClientConfig, runtime: Handle) -> anyhow::Result<Self> {
        let events = EventHandler::new(TICK_RATE);
        let alerts = Arc::new(ChannelAlerts::new(events.sender()));
        let controller = LoginController::from_config(config, alerts)?;
        Ok(Self::with_controller(Arc::new(controller), events, runtime))
    }

    /// Create the application around an existing controller.
    ///
    /// The controller's alert sink should feed `events`.
    pub fn with_controller(
        controller: Arc<LoginController>,
        events: EventHandler,
        runtime: Handle,
    ) -> Self {
        let login_updates = controller.subscribe();
        Self {
            state: AppState::new(controller.locale()),
            theme: Theme::default(),
            should_quit: false,
            controller,
            login_updates,
            events,
            runtime,
            last_tick: Instant::now(),
        }
    }

    /// Run the application main loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        while !self.should_quit {
            self.sync_login_state();

            // Draw UI
            terminal.draw(|frame| ui::render(frame, self))?;

            // Handle events
            if let Some(key) = self.events.poll_keyboard()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_event(Event::Key(key));
                }
            }
            self.process_pending();

            // Update tick
            if self.last_tick.elapsed() >= self.events.tick_rate() {
                self.state.tick = self.state.tick.wrapping_add(1);
                self.last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Handle every event queued by background tasks
    pub fn process_pending(&mut self) {
        while let Some(event) = self.events.try_recv() {
            self.handle_event(event);
        }
        self.sync_login_state();
    }

    /// Apply a single event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Alert(alert) => {
                tracing::debug!(title = %alert.title, "Showing alert");
                self.state.alerts.push_back(alert);
            }
            Event::AuthFinished { strategy, outcome } => {
                if strategy == AuthStrategy::Biometric {
                    self.state.biometric_pending = false;
                }
                if self.state.shell.apply(outcome) {
                    self.state.focus = Focus::Username;
                }
            }
        }
    }

    /// Copy the controller's latest form state for rendering
    fn sync_login_state(&mut self) {
        if self.login_updates.has_changed().unwrap_or(false) {
            self.state.login = self.login_updates.borrow_and_update().clone();
        }
    }

    /// Handle key press events
    fn handle_key(&mut self, key: KeyEvent) {
        // Global quit handler
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // An open alert swallows everything until dismissed
        if self.state.has_alert() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.dismiss_alert();
            }
            return;
        }

        match self.state.current_screen() {
            Screen::Login => self.handle_login_key(key.code),
            Screen::Main => self.handle_main_key(key.code),
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        let focus = self.state.focus;
        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.state.focus = focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.state.focus = focus.prev(),
            KeyCode::Enter => match focus {
                Focus::Username => self.state.focus = Focus::Password,
                Focus::Password | Focus::Submit => self.submit(AuthStrategy::Password),
                Focus::Biometric => self.submit(AuthStrategy::Biometric),
            },
            KeyCode::Char(' ') if focus == Focus::Submit => self.submit(AuthStrategy::Password),
            KeyCode::Char(' ') if focus == Focus::Biometric => {
                self.submit(AuthStrategy::Biometric)
            }
            KeyCode::Backspace if focus.is_field() => self.edit_focused_field(|value| {
                value.pop();
            }),
            KeyCode::Char(c) if focus.is_field() => {
                self.edit_focused_field(|value| value.push(c))
            }
            _ => {}
        }
    }

    fn handle_main_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                self.state.shell.back();
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Apply an edit to the focused text field through the controller
    fn edit_focused_field(&mut self, edit: impl FnOnce(&mut String)) {
        match self.state.focus {
            Focus::Username => self.controller.edit_username(edit),
            Focus::Password => self.controller.edit_password(edit),
            Focus::Submit | Focus::Biometric => {}
        }
        self.sync_login_state();
    }

    /// Start an authentication attempt in the background
    fn submit(&mut self, strategy: AuthStrategy) {
        // The submit button is disabled while a request is outstanding
        if strategy == AuthStrategy::Password && self.controller.is_loading() {
            tracing::debug!("Submit ignored while loading");
            return;
        }
        if strategy == AuthStrategy::Biometric {
            // One fingerprint prompt at a time
            if self.state.biometric_pending {
                tracing::debug!("Biometric prompt already open");
                return;
            }
            self.state.biometric_pending = true;
        }

        let controller = Arc::clone(&self.controller);
        let sender = self.events.sender();
        self.runtime.spawn(async move {
            let outcome = controller.authenticate(strategy).await;
            let _ = sender.send(Event::AuthFinished { strategy, outcome });
        });
    }
}
