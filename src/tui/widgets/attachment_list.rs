//! Attachment panel: table of the open message's attachments.

use humansize::{format_size, BINARY};
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::i18n;
use crate::tui::app::{App, PanelFocus};
use crate::tui::theme::current_theme;

/// Render the attachment table with a selection marker.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = current_theme();

    let is_focused = app.focus == PanelFocus::Attachments;
    let border_style = if is_focused {
        theme.border_focused
    } else {
        theme.border
    };

    let count = app.attachment_count();
    let title = format!("{}({count}) ", i18n::tui_attachments_title());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    // One inner row is taken by the column header.
    app.attachment_view_height = (inner.height as usize).saturating_sub(1);
    frame.render_widget(block, area);

    if count == 0 {
        let empty = Paragraph::new(i18n::tui_no_attachments()).style(theme.body);
        frame.render_widget(empty, inner);
        return;
    }

    // Window the rows so the selection stays visible in short panes.
    let visible = app.attachment_view_height.max(1);
    let max_offset = count.saturating_sub(visible);
    if app.attachment_offset > max_offset {
        app.attachment_offset = max_offset;
    }
    let offset = app.attachment_offset;
    let selected = app.attachment_selected;

    let size_w = app.config.columns.size_width;
    let type_w = app.config.columns.type_width;
    let show_type = (inner.width as usize) > size_w as usize + type_w as usize + 20;

    let name_avail = (inner.width as usize)
        .saturating_sub(2 + size_w as usize + 2)
        .saturating_sub(if show_type { type_w as usize + 1 } else { 0 });

    let Some(message) = app.message.as_ref() else {
        return;
    };

    let rows: Vec<Row> = message
        .attachments
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, att)| {
            let is_selected = i == selected;
            let marker = if is_selected { ">" } else { " " };
            let style = if is_selected {
                theme.list_selected
            } else {
                theme.body
            };
            let name_style = if is_selected {
                theme.list_selected
            } else {
                theme.attachment
            };

            let mut cells = vec![
                Cell::from(marker).style(style),
                Cell::from(truncate_name(&att.display_name(i), name_avail)).style(name_style),
            ];
            if show_type {
                cells.push(
                    Cell::from(att.mime_type.clone().unwrap_or_default()).style(style),
                );
            }
            cells.push(Cell::from(format_size(att.size(), BINARY)).style(style));
            Row::new(cells)
        })
        .collect();

    let mut header_cells = vec![
        Cell::from("").style(theme.list_header),
        Cell::from(i18n::tui_col_filename()).style(theme.list_header),
    ];
    if show_type {
        header_cells.push(Cell::from(i18n::tui_col_type()).style(theme.list_header));
    }
    header_cells.push(Cell::from(i18n::tui_col_size()).style(theme.list_header));
    let header = Row::new(header_cells);

    let mut constraints = vec![Constraint::Length(2), Constraint::Min(12)];
    if show_type {
        constraints.push(Constraint::Length(type_w));
    }
    constraints.push(Constraint::Length(size_w));

    let table = Table::new(rows, constraints)
        .header(header)
        .column_spacing(1);

    frame.render_widget(table, inner);
}

/// Truncate to a display width, ending with an ellipsis.
fn truncate_name(name: &str, max_width: usize) -> String {
    if max_width == 0 || name.width() <= max_width {
        return name.to_string();
    }
    let mut out = String::new();
    let mut w = 0;
    for c in name.chars() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0);
        if w + cw > max_width.saturating_sub(1) {
            break;
        }
        out.push(c);
        w += cw;
    }
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_name_unchanged() {
        assert_eq!(truncate_name("photo.png", 20), "photo.png");
    }

    #[test]
    fn test_truncate_long_name() {
        let out = truncate_name("a-very-long-attachment-name.png", 10);
        assert!(out.width() <= 10);
        assert!(out.ends_with('\u{2026}'));
    }

    #[test]
    fn test_truncate_wide_chars() {
        // CJK characters are two cells wide each.
        let out = truncate_name("\u{6dfb}\u{4ed8}\u{30d5}\u{30a1}\u{30a4}\u{30eb}.png", 6);
        assert!(out.width() <= 6);
    }
}
