//! Path input popup for opening files and choosing save destinations.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::i18n;
use crate::tui::app::{App, PromptKind};
use crate::tui::theme::current_theme;

/// Render the path prompt centered on screen.
pub fn render(frame: &mut Frame, app: &App) {
    let Some(prompt) = &app.prompt else {
        return;
    };
    let theme = current_theme();
    let screen = frame.area();

    let width = (screen.width * 7 / 10)
        .max(40)
        .min(screen.width.saturating_sub(2));
    let area = centered_rect_exact(width, 4, screen);

    frame.render_widget(Clear, area);

    let title = match prompt.kind {
        PromptKind::Open => i18n::tui_prompt_open_title(),
        PromptKind::SaveAttachment => i18n::tui_prompt_save_title(),
        PromptKind::SaveAll => i18n::tui_prompt_save_all_title(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(title)
        .style(theme.popup);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Keep the tail of long paths visible.
    let avail = (inner.width as usize).saturating_sub(5);
    let mut shown = prompt.input.as_str();
    while shown.width() > avail {
        let mut chars = shown.chars();
        chars.next();
        shown = chars.as_str();
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(" > ", theme.prompt),
            Span::styled(shown.to_string(), theme.popup),
            Span::styled("_", theme.prompt),
        ]),
        Line::from(Span::styled(
            format!(" {}", i18n::tui_prompt_footer()),
            theme.help_dim,
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Calculate a centered rectangle with exact dimensions, clamped to screen.
fn centered_rect_exact(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
