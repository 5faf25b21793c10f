//! Main screen shown after a successful sign-in

use latch_core::Text;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::ui::layout::{centered_rect_fixed, render_footer, render_header, ScreenLayout};

/// Draw the main screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let locale = app.state.locale;
    let layout = ScreenLayout::new(area);

    render_header(
        frame,
        layout.header,
        &app.state.shell.breadcrumb(locale),
        theme,
    );

    let body = centered_rect_fixed(44, 3, layout.content);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(body);

    let title = Paragraph::new(locale.text(Text::MainTitle))
        .style(theme.title())
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    if app.state.shell.can_go_back() {
        let back = Paragraph::new(format!("< {}", locale.text(Text::BackButton)))
            .style(theme.link(true))
            .alignment(Alignment::Center);
        frame.render_widget(back, chunks[2]);
    }

    render_footer(
        frame,
        layout.footer,
        &[
            ("Enter", locale.text(Text::BackButton)),
            ("q", locale.text(Text::HintQuit)),
        ],
        theme,
    );
}
