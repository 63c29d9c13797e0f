//! Application state for the TUI.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::i18n;
use crate::model::attachment::Attachment;
use crate::model::message::Message;
use crate::parser;
use crate::render;
use crate::scratch::ScratchDir;

/// Which panel has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    Body,
    Attachments,
}

/// Which path prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    SaveAttachment,
    SaveAll,
}

/// State of the path input popup.
pub struct PathPrompt {
    pub kind: PromptKind,
    pub input: String,
}

/// How long transient status messages stay visible.
const STATUS_TIMEOUT_SECS: u64 = 5;

/// Central application state.
///
/// Holds at most one open message at a time. Loading a new file
/// releases the temporary files of the previous one before anything
/// else happens, so scratch space never accumulates across loads.
pub struct App {
    // ── Configuration ───────────────────────────────
    pub config: Config,

    // ── Open message ────────────────────────────────
    pub msg_path: Option<PathBuf>,
    pub message: Option<Message>,
    scratch: Option<ScratchDir>,
    /// Rendered body text, `cid:` references already resolved.
    pub body: String,
    pub body_line_count: usize,

    // ── Panels and navigation ───────────────────────
    pub focus: PanelFocus,
    pub body_scroll: usize,
    /// Inner height of the body panel, updated on every render.
    pub body_view_height: usize,
    pub show_full_headers: bool,
    pub attachment_selected: usize,
    pub attachment_offset: usize,
    /// Visible rows of the attachment table, updated on every render.
    pub attachment_view_height: usize,

    // ── Image preview ───────────────────────────────
    picker: Option<Picker>,
    pub preview: Option<StatefulProtocol>,

    // ── Popups ──────────────────────────────────────
    pub show_help: bool,
    pub prompt: Option<PathPrompt>,
    /// Modal dialog: (title, text). Captures all input while open.
    pub dialog: Option<(String, String)>,

    // ── Status ──────────────────────────────────────
    pub status_message: Option<(String, Instant)>,
    pub should_quit: bool,
}

impl App {
    /// Create an application with nothing loaded. Does no I/O, so it
    /// can be constructed in tests without a terminal.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            msg_path: None,
            message: None,
            scratch: None,
            body: String::new(),
            body_line_count: 0,
            focus: PanelFocus::Body,
            body_scroll: 0,
            body_view_height: 0,
            show_full_headers: false,
            attachment_selected: 0,
            attachment_offset: 0,
            attachment_view_height: 0,
            picker: None,
            preview: None,
            show_help: false,
            prompt: None,
            dialog: None,
            status_message: None,
            should_quit: false,
        }
    }

    /// Attach the terminal graphics picker. Without one, previews
    /// fall back to the textual label.
    pub fn set_picker(&mut self, picker: Option<Picker>) {
        self.picker = picker;
    }

    // ── Loading ─────────────────────────────────────

    /// Open `path`, replacing whatever message is currently shown.
    ///
    /// The previous message's temporary files are released first. On
    /// failure the viewer is left in the cleared empty state and a
    /// modal dialog reports the error; the window stays usable.
    pub fn load_file(&mut self, path: &Path) {
        self.clear_message();

        match Self::open_message(path) {
            Ok((message, scratch, body)) => {
                debug!(
                    path = %path.display(),
                    attachments = message.attachments.len(),
                    "Opened message"
                );
                self.body_line_count = body.lines().count();
                self.body = body;
                self.message = Some(message);
                self.scratch = Some(scratch);
                self.msg_path = Some(path.to_path_buf());
                self.rebuild_preview();

                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_status(format!("{}: {name}", i18n::tui_loaded()));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to open message");
                self.dialog = Some((
                    i18n::tui_error().to_string(),
                    format!("{}:\n{}\n\n{e}", i18n::err_load_failed(), path.display()),
                ));
            }
        }
    }

    /// Parse the file and render its body into fresh scratch space.
    fn open_message(path: &Path) -> Result<(Message, ScratchDir, String)> {
        let message = parser::parse_msg(path)?;
        let mut scratch = ScratchDir::new()?;
        let body = render::render_body(&message, &mut scratch)?;
        Ok((message, scratch, body))
    }

    /// Reset to the empty state, deleting the current message's
    /// temporary files.
    fn clear_message(&mut self) {
        self.msg_path = None;
        self.message = None;
        self.body.clear();
        self.body_line_count = 0;
        self.body_scroll = 0;
        self.show_full_headers = false;
        self.attachment_selected = 0;
        self.attachment_offset = 0;
        self.preview = None;
        self.focus = PanelFocus::Body;
        if let Some(scratch) = self.scratch.take() {
            scratch.release();
        }
    }

    /// Quit the application, releasing temporary files immediately.
    pub fn quit(&mut self) {
        if let Some(scratch) = self.scratch.take() {
            scratch.release();
        }
        self.should_quit = true;
    }

    // ── Queries ─────────────────────────────────────

    pub fn has_attachments(&self) -> bool {
        self.message.as_ref().is_some_and(|m| m.has_attachments())
    }

    pub fn attachment_count(&self) -> usize {
        self.message.as_ref().map_or(0, |m| m.attachments.len())
    }

    pub fn selected_attachment(&self) -> Option<&Attachment> {
        self.message
            .as_ref()
            .and_then(|m| m.attachments.get(self.attachment_selected))
    }

    /// Line count of whatever the body panel currently shows.
    pub fn body_total_lines(&self) -> usize {
        if self.show_full_headers {
            self.message
                .as_ref()
                .and_then(|m| m.transport_headers.as_deref())
                .map_or(1, |h| h.lines().count())
        } else {
            self.body_line_count
        }
    }

    pub fn max_body_scroll(&self) -> usize {
        self.body_total_lines()
            .saturating_sub(self.body_view_height.max(1))
    }

    // ── Attachment selection ────────────────────────

    pub fn select_next_attachment(&mut self) {
        let count = self.attachment_count();
        if count > 0 && self.attachment_selected + 1 < count {
            self.attachment_selected += 1;
            self.ensure_attachment_visible();
            self.rebuild_preview();
        }
    }

    pub fn select_prev_attachment(&mut self) {
        if self.attachment_selected > 0 {
            self.attachment_selected -= 1;
            self.ensure_attachment_visible();
            self.rebuild_preview();
        }
    }

    pub fn select_first_attachment(&mut self) {
        if self.attachment_count() > 0 && self.attachment_selected != 0 {
            self.attachment_selected = 0;
            self.ensure_attachment_visible();
            self.rebuild_preview();
        }
    }

    pub fn select_last_attachment(&mut self) {
        let count = self.attachment_count();
        if count > 0 && self.attachment_selected != count - 1 {
            self.attachment_selected = count - 1;
            self.ensure_attachment_visible();
            self.rebuild_preview();
        }
    }

    /// Keep the selected row inside the visible window of the table.
    fn ensure_attachment_visible(&mut self) {
        let visible = self.attachment_view_height.max(1);
        if self.attachment_selected < self.attachment_offset {
            self.attachment_offset = self.attachment_selected;
        } else if self.attachment_selected >= self.attachment_offset + visible {
            self.attachment_offset = self.attachment_selected + 1 - visible;
        }
    }

    // ── Image preview ───────────────────────────────

    /// Decode the selected attachment into a render protocol.
    ///
    /// Anything that cannot be decoded (non-image extension, corrupt
    /// bytes, no graphics support) leaves `preview` empty and the
    /// pane shows the textual label instead. Never raises a dialog.
    pub fn rebuild_preview(&mut self) {
        self.preview = None;
        if !self.config.display.show_preview {
            return;
        }
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        let Some(message) = self.message.as_ref() else {
            return;
        };
        let Some(att) = message.attachments.get(self.attachment_selected) else {
            return;
        };
        if !att.is_image() || att.data.is_empty() {
            return;
        }
        match image::load_from_memory(&att.data) {
            Ok(img) => {
                self.preview = Some(picker.new_resize_protocol(img));
            }
            Err(e) => {
                debug!(
                    name = %att.display_name(self.attachment_selected),
                    error = %e,
                    "Could not decode image attachment"
                );
            }
        }
    }

    // ── Status ──────────────────────────────────────

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Periodic housekeeping, called once per event-loop iteration.
    pub fn tick(&mut self) {
        if let Some((_, when)) = &self.status_message {
            if when.elapsed() >= Duration::from_secs(STATUS_TIMEOUT_SECS) {
                self.status_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Config::default())
    }

    #[test]
    fn test_new_app_is_empty() {
        let app = app();
        assert!(app.message.is_none());
        assert!(app.msg_path.is_none());
        assert_eq!(app.attachment_count(), 0);
        assert!(!app.has_attachments());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_load_missing_file_raises_dialog() {
        let mut app = app();
        app.load_file(Path::new("/nonexistent/message.msg"));
        assert!(app.message.is_none());
        assert!(app.dialog.is_some());
    }

    #[test]
    fn test_load_failure_clears_previous_state() {
        let mut app = app();
        app.body = "leftover".to_string();
        app.body_line_count = 1;
        app.body_scroll = 3;
        app.load_file(Path::new("/nonexistent/message.msg"));
        assert!(app.body.is_empty());
        assert_eq!(app.body_line_count, 0);
        assert_eq!(app.body_scroll, 0);
    }

    #[test]
    fn test_selection_moves_stay_in_bounds() {
        let mut app = app();
        app.select_next_attachment();
        app.select_prev_attachment();
        app.select_last_attachment();
        assert_eq!(app.attachment_selected, 0);
    }

    #[test]
    fn test_status_clears_after_timeout() {
        let mut app = app();
        app.set_status("saved");
        assert!(app.status_message.is_some());
        // Backdate the timestamp instead of sleeping.
        if let Some((_, when)) = app.status_message.as_mut() {
            *when = Instant::now() - Duration::from_secs(STATUS_TIMEOUT_SECS + 1);
        }
        app.tick();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut app = app();
        app.quit();
        assert!(app.should_quit);
    }

    #[test]
    fn test_max_body_scroll() {
        let mut app = app();
        app.body = "a\nb\nc\nd\ne".to_string();
        app.body_line_count = 5;
        app.body_view_height = 3;
        assert_eq!(app.max_body_scroll(), 2);
        app.body_view_height = 10;
        assert_eq!(app.max_body_scroll(), 0);
    }
}
