//! Modal alert dialog

use latch_core::{Alert, Locale, Text};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::ui::{layout::centered_rect_fixed, Theme};

/// Alert dialog drawn over the current screen
pub struct AlertDialog<'a> {
    alert: &'a Alert,
    locale: Locale,
}

impl<'a> AlertDialog<'a> {
    pub fn new(alert: &'a Alert, locale: Locale) -> Self {
        Self { alert, locale }
    }

    /// Render the dialog
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = 50.min(area.width);
        let height = dialog_height(self.alert.message.chars().count(), width);
        let dialog_area = centered_rect_fixed(width, height, area);

        // Clear the background
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", self.alert.title))
            .title_style(theme.danger())
            .borders(Borders::ALL)
            .border_style(theme.border(true))
            .style(theme.background());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let message = Paragraph::new(self.alert.message.as_str())
            .style(theme.text())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        let hint = Paragraph::new(self.locale.text(Text::DismissHint))
            .style(theme.text_muted())
            .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[1]);
    }
}

/// Rows needed for a message of `chars` characters in a dialog `width` wide
fn dialog_height(chars: usize, width: u16) -> u16 {
    let text_width = usize::from(width.saturating_sub(4).max(1));
    let lines = u16::try_from(chars / text_width).unwrap_or(u16::MAX);
    lines.saturating_add(1).saturating_add(6)
}
