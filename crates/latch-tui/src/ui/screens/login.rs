//! Login screen: credential fields, sign-in button and biometric shortcut

use latch_core::Text;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, Focus};
use crate::ui::components::spinner::Spinner;
use crate::ui::layout::{centered_rect_fixed, render_footer, render_header, ScreenLayout};
use crate::ui::Theme;

/// Mask character for the password field
const MASK: char = '●';

/// Draw the login screen
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

    let form = centered_rect_fixed(44, 16, layout.content);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Subtitle
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Submit
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Biometric
            Constraint::Min(0),
        ])
        .split(form);

    let title = Paragraph::new(locale.text(Text::WelcomeTitle))
        .style(theme.title())
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let subtitle = Paragraph::new(locale.text(Text::WelcomeSubtitle))
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let credentials = &app.state.login.credentials;
    let focus = app.state.focus;

    draw_field(
        frame,
        chunks[3],
        &credentials.username,
        locale.text(Text::UsernamePlaceholder),
        focus == Focus::Username,
        theme,
    );
    let masked: String = credentials.password.chars().map(|_| MASK).collect();
    draw_field(
        frame,
        chunks[4],
        &masked,
        locale.text(Text::PasswordPlaceholder),
        focus == Focus::Password,
        theme,
    );

    // The button turns into a spinner while a request is outstanding
    if app.state.login.loading {
        Spinner::new(locale.text(Text::SigningIn), app.state.tick).render(
            frame,
            chunks[6],
            theme.button(false, false),
        );
    } else {
        let label = format!(" {} ", locale.text(Text::SubmitButton));
        let button = Paragraph::new(label)
            .style(theme.button(focus == Focus::Submit, true))
            .alignment(Alignment::Center);
        frame.render_widget(button, chunks[6]);
    }

    // fprintd has no dialog of its own, so the prompt is shown here
    if app.state.biometric_pending {
        Spinner::new(locale.text(Text::BiometricPrompt), app.state.tick).render(
            frame,
            chunks[8],
            theme.link(true),
        );
    } else {
        let biometric = Paragraph::new(locale.text(Text::BiometricButton))
            .style(theme.link(focus == Focus::Biometric))
            .alignment(Alignment::Center);
        frame.render_widget(biometric, chunks[8]);
    }

    render_footer(
        frame,
        layout.footer,
        &[
            ("Tab", locale.text(Text::HintNext)),
            ("Enter", locale.text(Text::HintSelect)),
            ("Esc", locale.text(Text::HintQuit)),
        ],
        theme,
    );
}

/// Draw a bordered text field, showing the placeholder while empty
fn draw_field(
    frame: &mut Frame,
    area: Rect,
    value: &str,
    placeholder: &str,
    focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .style(theme.input(focused));

    let content = if value.is_empty() {
        Paragraph::new(placeholder).style(theme.placeholder())
    } else if focused {
        Paragraph::new(format!("{}_", value)).style(theme.input(true))
    } else {
        Paragraph::new(value).style(theme.input(false))
    };

    frame.render_widget(content.block(block), area);
}
