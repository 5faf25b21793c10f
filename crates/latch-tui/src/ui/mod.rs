//! UI rendering

pub mod components;
pub mod layout;
pub mod screens;
pub mod theme;

pub use theme::Theme;

use ratatui::prelude::*;

use crate::app::App;
use latch_core::Screen;

/// Main render function - delegates to the current screen, then overlays any alert
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background
    frame.render_widget(
        ratatui::widgets::Block::default().style(app.theme.background()),
        area,
    );

    match app.state.current_screen() {
        Screen::Login => screens::login::draw(frame, area, app),
        Screen::Main => screens::main_screen::draw(frame, area, app),
    }

    if let Some(alert) = app.state.alert() {
        components::alert::AlertDialog::new(alert, app.state.locale).render(frame, area, &app.theme);
    }
}
