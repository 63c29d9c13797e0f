//! Main render function that dispatches to widgets.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use super::app::App;
use super::widgets;

/// Render the entire TUI frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // Vertical layout: header (1) + content (flex) + status (1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header bar
            Constraint::Min(5),    // content
            Constraint::Length(1), // status bar
        ])
        .split(size);

    // Header bar
    widgets::header_bar::render(frame, app, vertical[0]);

    // Metadata panel on top, body (and attachments) below
    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(vertical[1]);

    widgets::metadata::render(frame, app, content[0]);

    if app.has_attachments() {
        let panel_width = app.config.display.preview_width.max(24);
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(panel_width)])
            .split(content[1]);

        widgets::body_view::render(frame, app, row[0]);

        if app.config.display.show_preview {
            let preview_height = app.config.display.preview_height.saturating_add(2);
            let side = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(4), Constraint::Length(preview_height)])
                .split(row[1]);
            widgets::attachment_list::render(frame, app, side[0]);
            widgets::preview::render(frame, app, side[1]);
        } else {
            widgets::attachment_list::render(frame, app, row[1]);
        }
    } else {
        widgets::body_view::render(frame, app, content[1]);
    }

    // Status bar
    widgets::status_bar::render(frame, app, vertical[2]);

    // Popups (rendered on top of everything; dialog wins)
    if app.show_help {
        widgets::help_popup::render(frame, app);
    }
    if app.prompt.is_some() {
        widgets::path_prompt::render(frame, app);
    }
    if app.dialog.is_some() {
        widgets::message_dialog::render(frame, app);
    }
}
