use ratatui::style::{Color, Modifier, Style};

/// Clinical blue/white palette
pub struct Theme;

impl Theme {
    pub const FG: Color = Color::White;
    pub const ACCENT: Color = Color::Rgb(64, 160, 255);
    pub const MUTED: Color = Color::Rgb(120, 130, 140);
    pub const SUCCESS: Color = Color::Rgb(80, 220, 120);
    pub const ERROR: Color = Color::Rgb(255, 90, 90);

    pub fn title() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Focused widget or button
    pub fn selected() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS).add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }
}
