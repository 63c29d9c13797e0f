//! Modal dialog for errors and notices.
//!
//! While a dialog is open it captures all input; closing it returns
//! the viewer to whatever state it was in.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the dialog centered on screen.
pub fn render(frame: &mut Frame, app: &App) {
    let Some((title, text)) = &app.dialog else {
        return;
    };
    let theme = current_theme();
    let screen = frame.area();

    let width = (screen.width * 6 / 10)
        .max(36)
        .min(screen.width.saturating_sub(4));
    let inner_width = width.saturating_sub(4).max(1) as usize;

    // Estimate wrapped line count to size the popup.
    let text_lines: u16 = text
        .lines()
        .map(|l| (l.chars().count() / inner_width + 1) as u16)
        .sum();
    let height = (text_lines + 4).min(screen.height.saturating_sub(2));

    let area = centered_rect_exact(width, height, screen);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(format!(" {title} "))
        .style(theme.popup);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = text
        .lines()
        .map(|l| Line::from(Span::styled(format!(" {l}"), theme.popup)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {}", i18n::tui_dialog_footer()),
        theme.help_dim,
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// Calculate a centered rectangle with exact dimensions, clamped to screen.
fn centered_rect_exact(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
