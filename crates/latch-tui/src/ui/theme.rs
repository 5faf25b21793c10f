//! Visual theme and color palette

use ratatui::style::{Color, Modifier, Style};

/// Latch color palette
pub struct Theme {
    // Branding
    pub accent: Color,
    pub background: Color,

    // Status
    pub danger: Color,
    pub biometric: Color,

    // UI elements
    pub input_bg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub disabled: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(230, 0, 0),      // #E60000
            background: Color::Rgb(0, 0, 0),    // #000000
            danger: Color::Rgb(244, 67, 54),    // #F44336
            biometric: Color::Rgb(255, 87, 51), // #FF5733

            input_bg: Color::Rgb(34, 34, 34),          // #222222
            border: Color::Rgb(85, 85, 85),            // #555555
            border_focused: Color::Rgb(230, 0, 0),     // #E60000
            text_primary: Color::Rgb(250, 250, 250),   // #FAFAFA
            text_secondary: Color::Rgb(189, 189, 189), // #BDBDBD
            text_muted: Color::Rgb(117, 117, 117),     // #757575
            disabled: Color::Rgb(90, 30, 30),
        }
    }
}

impl Theme {
    /// Screen background
    pub fn background(&self) -> Style {
        Style::default().bg(self.background)
    }

    /// Get default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Get secondary text style
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Get muted text style
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get border style
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Get danger style
    pub fn danger(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    /// Get input field style
    pub fn input(&self, focused: bool) -> Style {
        let fg = if focused {
            self.text_primary
        } else {
            self.text_secondary
        };
        Style::default().fg(fg).bg(self.input_bg)
    }

    /// Placeholder shown in an empty field
    pub fn placeholder(&self) -> Style {
        Style::default().fg(self.text_muted).bg(self.input_bg)
    }

    /// Filled red button; dimmed while disabled
    pub fn button(&self, focused: bool, enabled: bool) -> Style {
        let style = Style::default().fg(self.text_primary);
        match (enabled, focused) {
            (false, _) => style.bg(self.disabled).fg(self.text_muted),
            (true, true) => style.bg(self.accent).add_modifier(Modifier::BOLD | Modifier::REVERSED),
            (true, false) => style.bg(self.accent).add_modifier(Modifier::BOLD),
        }
    }

    /// Text-only biometric link
    pub fn link(&self, focused: bool) -> Style {
        let style = Style::default().fg(self.biometric);
        if focused {
            style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            style
        }
    }

    /// Spinner and busy text
    pub fn busy(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
