//! Color theme definitions for the TUI.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

static ACTIVE_THEME: OnceLock<Theme> = OnceLock::new();

/// A complete color theme for the TUI.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub header_bar: Style,
    pub status_bar: Style,
    pub metadata_label: Style,
    pub metadata_value: Style,
    pub body: Style,
    pub url: Style,
    pub attachment: Style,
    pub list_selected: Style,
    pub list_header: Style,
    pub border: Style,
    pub border_focused: Style,
    pub popup: Style,
    pub popup_title: Style,
    pub prompt: Style,
    pub help_section: Style,
    pub help_dim: Style,
}

impl Theme {
    /// Dark theme (default).
    pub fn dark() -> Self {
        Self {
            header_bar: Style::default()
                .fg(Color::Rgb(200, 200, 220))
                .bg(Color::Rgb(30, 30, 46)),
            status_bar: Style::default()
                .fg(Color::Rgb(150, 150, 170))
                .bg(Color::Rgb(30, 30, 46)),
            metadata_label: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            metadata_value: Style::default().fg(Color::Rgb(220, 220, 230)),
            body: Style::default().fg(Color::Rgb(220, 220, 230)),
            url: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
            attachment: Style::default().fg(Color::Green),
            list_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 100)),
            list_header: Style::default()
                .fg(Color::Rgb(180, 180, 200))
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            border_focused: Style::default().fg(Color::Rgb(130, 170, 255)),
            popup: Style::default()
                .fg(Color::Rgb(220, 220, 230))
                .bg(Color::Rgb(20, 20, 35)),
            popup_title: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            prompt: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            help_section: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            help_dim: Style::default().fg(Color::Rgb(120, 120, 140)),
        }
    }

    /// Light theme for bright terminal backgrounds.
    pub fn light() -> Self {
        Self {
            header_bar: Style::default()
                .fg(Color::Rgb(40, 40, 60))
                .bg(Color::Rgb(220, 220, 235)),
            status_bar: Style::default()
                .fg(Color::Rgb(90, 90, 110))
                .bg(Color::Rgb(220, 220, 235)),
            metadata_label: Style::default()
                .fg(Color::Rgb(30, 80, 180))
                .add_modifier(Modifier::BOLD),
            metadata_value: Style::default().fg(Color::Rgb(40, 40, 50)),
            body: Style::default().fg(Color::Rgb(40, 40, 50)),
            url: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            attachment: Style::default().fg(Color::Rgb(0, 120, 40)),
            list_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(180, 190, 230)),
            list_header: Style::default()
                .fg(Color::Rgb(60, 60, 90))
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Rgb(160, 160, 180)),
            border_focused: Style::default().fg(Color::Rgb(30, 80, 180)),
            popup: Style::default()
                .fg(Color::Rgb(40, 40, 50))
                .bg(Color::Rgb(235, 235, 245)),
            popup_title: Style::default()
                .fg(Color::Rgb(30, 80, 180))
                .add_modifier(Modifier::BOLD),
            prompt: Style::default()
                .fg(Color::Rgb(160, 100, 0))
                .add_modifier(Modifier::BOLD),
            help_section: Style::default()
                .fg(Color::Rgb(30, 80, 180))
                .add_modifier(Modifier::BOLD),
            help_dim: Style::default().fg(Color::Rgb(130, 130, 150)),
        }
    }

    /// Look up a theme by its config name. Unknown names fall back to dark.
    pub fn named(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

/// Select the process-wide theme. Call once at startup; later calls are no-ops.
pub fn set_theme(theme: Theme) {
    let _ = ACTIVE_THEME.set(theme);
}

/// Return the active theme.
pub fn current_theme() -> Theme {
    ACTIVE_THEME.get().copied().unwrap_or_else(Theme::dark)
}
