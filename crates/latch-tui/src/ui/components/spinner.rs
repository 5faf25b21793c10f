//! Activity spinner

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner animation for indeterminate progress
pub struct Spinner<'a> {
    /// Current frame
    frame: usize,
    /// Label text
    label: &'a str,
}

impl<'a> Spinner<'a> {
    /// Create a spinner positioned by the app tick counter
    pub fn new(label: &'a str, tick: u64) -> Self {
        Self {
            frame: (tick % FRAMES.len() as u64) as usize,
            label,
        }
    }

    /// Glyph for the current frame
    pub fn glyph(&self) -> char {
        FRAMES[self.frame]
    }

    /// Render the spinner
    pub fn render(&self, frame: &mut Frame, area: Rect, style: Style) {
        let paragraph = Paragraph::new(format!("{} {}", self.glyph(), self.label))
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
