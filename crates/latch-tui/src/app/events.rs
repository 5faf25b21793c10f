//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use latch_core::{Alert, AlertSink, AuthOutcome, AuthStrategy};
use tokio::sync::mpsc;

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// The login flow raised an alert
    Alert(Alert),
    /// A spawned authentication attempt settled
    AuthFinished {
        strategy: AuthStrategy,
        outcome: AuthOutcome,
    },
}

/// Collects keyboard input and results from background tasks
pub struct EventHandler {
    /// Sender for events
    sender: mpsc::UnboundedSender<Event>,
    /// Receiver for events
    receiver: mpsc::UnboundedReceiver<Event>,
    /// How long to wait for a key before redrawing
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            tick_rate,
        }
    }

    /// Get a clone of the sender for other tasks to send events
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }

    /// Try to receive the next event (non-blocking)
    pub fn try_recv(&mut self) -> Option<Event> {
        self.receiver.try_recv().ok()
    }

    /// Poll for keyboard events with timeout
    pub fn poll_keyboard(&self) -> std::io::Result<Option<KeyEvent>> {
        if event::poll(self.tick_rate)? {
            if let CrosstermEvent::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }
}

/// Alert sink that forwards alerts into the UI event queue
pub struct ChannelAlerts {
    sender: mpsc::UnboundedSender<Event>,
}

impl ChannelAlerts {
    pub fn new(sender: mpsc::UnboundedSender<Event>) -> Self {
        Self { sender }
    }
}

impl AlertSink for ChannelAlerts {
    fn show(&self, alert: Alert) {
        if self.sender.send(Event::Alert(alert)).is_err() {
            tracing::warn!("UI event queue closed, dropping alert");
        }
    }
}
