//! Top header bar showing the application name and the open file.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the top header bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let mut spans = vec![Span::styled(
        format!(" {}", i18n::app_name()),
        theme.header_bar,
    )];

    if let Some(path) = &app.msg_path {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        spans.push(Span::styled(format!(" | {file_name}"), theme.header_bar));
    }

    if let Some(message) = &app.message {
        if message.has_attachments() {
            spans.push(Span::styled(
                format!(
                    " | {}: {}",
                    i18n::tui_attachments_count(),
                    message.attachments.len()
                ),
                theme.header_bar,
            ));
        }
    }

    // Right-aligned help hint
    let left_len: usize = spans.iter().map(|s| s.content.len()).sum();
    let right_text = i18n::tui_help_hint();
    let padding = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(right_text.len());
    if padding > 0 {
        spans.push(Span::styled(" ".repeat(padding), theme.header_bar));
    }
    spans.push(Span::styled(right_text, theme.header_bar));

    let line = Line::from(spans);
    let bar = Paragraph::new(line).style(theme.header_bar);
    frame.render_widget(bar, area);
}
