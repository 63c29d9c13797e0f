//! Metadata panel: date, sender, recipients and subject of the open
//! message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the metadata panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(message) = &app.message else {
        let empty = Paragraph::new(i18n::tui_no_message()).style(theme.body);
        frame.render_widget(empty, inner);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    if let Some(date) = &message.date {
        lines.push(Line::from(vec![
            Span::styled(i18n::tui_header_date(), theme.metadata_label),
            Span::styled(
                date.format(&app.config.general.date_format).to_string(),
                theme.metadata_value,
            ),
        ]));
    }

    let from = message
        .sender_display()
        .unwrap_or_else(|| i18n::fallback_sender().to_string());
    lines.push(Line::from(vec![
        Span::styled(i18n::tui_header_from(), theme.metadata_label),
        Span::styled(from, theme.metadata_value),
    ]));

    let to = message
        .recipients_display()
        .unwrap_or_else(|| i18n::fallback_recipients().to_string());
    lines.push(Line::from(vec![
        Span::styled(i18n::tui_header_to(), theme.metadata_label),
        Span::styled(to, theme.metadata_value),
    ]));

    if let Some(cc) = message.cc_display() {
        lines.push(Line::from(vec![
            Span::styled(i18n::tui_header_cc(), theme.metadata_label),
            Span::styled(cc, theme.metadata_value),
        ]));
    }

    let subject = message
        .subject
        .clone()
        .unwrap_or_else(|| i18n::fallback_subject().to_string());
    lines.push(Line::from(vec![
        Span::styled(i18n::tui_header_subject(), theme.metadata_label),
        Span::styled(subject, theme.metadata_value),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}
