//! Preview pane for the selected attachment.
//!
//! Image attachments that decoded successfully are drawn through the
//! terminal graphics protocol, scaled to fit the pane. Everything
//! else gets a textual label with the file name.

use humansize::{format_size, BINARY};
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use ratatui_image::StatefulImage;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the preview pane.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = current_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(i18n::tui_preview_title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(protocol) = app.preview.as_mut() {
        frame.render_stateful_widget(StatefulImage::default(), inner, protocol);
        return;
    }

    // Text label fallback: file name, type and size.
    let index = app.attachment_selected;
    let Some(att) = app.selected_attachment() else {
        return;
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(att.display_name(index), theme.attachment)),
    ];
    if let Some(mime) = &att.mime_type {
        lines.push(Line::from(Span::styled(mime.clone(), theme.help_dim)));
    }
    lines.push(Line::from(Span::styled(
        format_size(att.size(), BINARY),
        theme.help_dim,
    )));
    if att.is_image() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            i18n::tui_preview_unavailable(),
            theme.help_dim,
        )));
    }

    let label = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(label, inner);
}
