//! Body panel: the rendered message text, or the raw transport
//! headers when the full-header view is toggled on.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::{App, PanelFocus};
use crate::tui::theme::{current_theme, Theme};

/// Render the body panel.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = current_theme();

    let is_focused = app.focus == PanelFocus::Body;
    let border_style = if is_focused {
        theme.border_focused
    } else {
        theme.border
    };

    let title = if app.show_full_headers {
        i18n::tui_headers_title()
    } else {
        i18n::tui_message_title()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let inner = block.inner(area);
    app.body_view_height = inner.height as usize;
    frame.render_widget(block, area);

    if app.message.is_none() {
        let empty = Paragraph::new(i18n::tui_no_message()).style(theme.body);
        frame.render_widget(empty, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();

    if app.show_full_headers {
        match app
            .message
            .as_ref()
            .and_then(|m| m.transport_headers.as_deref())
        {
            Some(raw) => {
                for line in raw.lines() {
                    lines.push(header_line(line, &theme));
                }
            }
            None => {
                lines.push(Line::from(Span::styled(
                    i18n::tui_no_headers(),
                    theme.body,
                )));
            }
        }
    } else {
        for line in app.body.lines() {
            lines.push(body_line(line, &theme));
        }
    }

    let total_lines = lines.len();
    let visible_height = inner.height as usize;
    let max_scroll = total_lines.saturating_sub(visible_height);
    let scroll = app.body_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, inner);
}

/// Style a transport header line, splitting at the first colon.
fn header_line<'a>(line: &str, theme: &Theme) -> Line<'a> {
    if let Some(colon_pos) = line.find(':') {
        let label = &line[..colon_pos + 1];
        let value = line[colon_pos + 1..].trim();
        Line::from(vec![
            Span::styled(format!("{label} "), theme.metadata_label),
            Span::styled(value.to_string(), theme.metadata_value),
        ])
    } else {
        // Continuation line of a folded header
        Line::from(Span::styled(
            format!("  {}", line.trim()),
            theme.metadata_value,
        ))
    }
}

/// Style a single body line: inline-image markers get the attachment
/// color, URLs are underlined.
fn body_line<'a>(line: &str, theme: &Theme) -> Line<'a> {
    if line.trim_start().starts_with("[image") {
        return Line::from(Span::styled(line.to_string(), theme.attachment));
    }

    let mut spans = Vec::new();
    let mut last_end = 0;

    let mut url_starts: Vec<usize> = line
        .match_indices("http://")
        .chain(line.match_indices("https://"))
        .map(|(start, _)| start)
        .collect();
    url_starts.sort_unstable();

    for start in url_starts {
        if start < last_end {
            continue;
        }
        if start > last_end {
            spans.push(Span::styled(line[last_end..start].to_string(), theme.body));
        }

        // Find the end of the URL: whitespace or a closing delimiter
        let rest = &line[start..];
        let url_end = rest
            .find(|c: char| c.is_whitespace() || c == '>' || c == ')' || c == '"')
            .unwrap_or(rest.len());

        spans.push(Span::styled(
            line[start..start + url_end].to_string(),
            theme.url,
        ));
        last_end = start + url_end;
    }

    if last_end < line.len() {
        spans.push(Span::styled(line[last_end..].to_string(), theme.body));
    }

    if spans.is_empty() {
        Line::from(Span::styled(line.to_string(), theme.body))
    } else {
        Line::from(spans)
    }
}
