//! Keyboard and input event handling.

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, PanelFocus, PathPrompt, PromptKind};
use crate::config;
use crate::export;
use crate::i18n;

/// Process a key event and update the application state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    // ── Popup handling (captures all keys) ────────────────
    if app.dialog.is_some() {
        if matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')
        ) {
            app.dialog = None;
        }
        return Ok(());
    }

    if app.prompt.is_some() {
        handle_prompt_input(app, key);
        return Ok(());
    }

    if app.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => app.show_help = false,
            _ => {}
        }
        return Ok(());
    }

    // ── Always-available shortcuts ────────────────────────
    match (key.modifiers, key.code) {
        // Ctrl+C always quits
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.quit();
        }
        (_, KeyCode::Char('q')) => {
            app.quit();
        }
        (_, KeyCode::Char('?')) => {
            app.show_help = true;
        }
        // Tab: cycle focus between body and attachments
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
            cycle_focus(app);
        }
        (_, KeyCode::Char('o')) => {
            open_prompt(app, PromptKind::Open);
        }
        (_, KeyCode::Char('h')) => {
            toggle_headers(app);
        }
        (_, KeyCode::Char('s')) => {
            if ensure_attachments(app) {
                open_prompt(app, PromptKind::SaveAttachment);
            }
        }
        (_, KeyCode::Char('a')) => {
            if ensure_attachments(app) {
                open_prompt(app, PromptKind::SaveAll);
            }
        }
        (_, KeyCode::Esc) => {
            if app.show_full_headers {
                app.show_full_headers = false;
                app.body_scroll = 0;
            }
        }

        // ── Navigation (panel dependent) ──────────────────
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => move_down(app),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => move_up(app),
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => move_first(app),
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => move_last(app),
        (_, KeyCode::PageDown) => page_down(app),
        (_, KeyCode::PageUp) => page_up(app),
        _ => {}
    }

    Ok(())
}

// ── Path prompt ───────────────────────────────────────────

fn handle_prompt_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.prompt = None;
        }
        KeyCode::Enter => {
            submit_prompt(app);
        }
        KeyCode::Backspace => {
            if let Some(p) = app.prompt.as_mut() {
                p.input.pop();
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(p) = app.prompt.as_mut() {
                p.input.clear();
            }
        }
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                if let Some(p) = app.prompt.as_mut() {
                    p.input.push(c);
                }
            }
        }
        _ => {}
    }
}

/// Open a path prompt, pre-filled with a sensible destination.
fn open_prompt(app: &mut App, kind: PromptKind) {
    let input = match kind {
        PromptKind::Open => String::new(),
        PromptKind::SaveAttachment => {
            let dir = config::download_dir(&app.config);
            match app.selected_attachment() {
                Some(att) => dir
                    .join(att.display_name(app.attachment_selected))
                    .to_string_lossy()
                    .into_owned(),
                None => return,
            }
        }
        PromptKind::SaveAll => config::download_dir(&app.config)
            .to_string_lossy()
            .into_owned(),
    };
    app.prompt = Some(PathPrompt { kind, input });
}

fn submit_prompt(app: &mut App) {
    let Some(prompt) = app.prompt.take() else {
        return;
    };
    let input = prompt.input.trim().to_string();
    if input.is_empty() {
        return;
    }
    match prompt.kind {
        PromptKind::Open => app.load_file(Path::new(&input)),
        PromptKind::SaveAttachment => save_selected(app, Path::new(&input)),
        PromptKind::SaveAll => save_all(app, Path::new(&input)),
    }
}

// ── Saving ────────────────────────────────────────────────

/// Save the selected attachment. A directory destination picks a
/// collision-free name inside it; a file destination is written as
/// given, overwriting an existing file.
fn save_selected(app: &mut App, dest: &Path) {
    let index = app.attachment_selected;
    let result = match app.selected_attachment() {
        Some(att) => {
            if dest.is_dir() {
                export::attachment::save_attachment_to_dir(att, index, dest)
            } else {
                export::attachment::save_attachment(att, dest).map(|()| dest.to_path_buf())
            }
        }
        None => return,
    };

    match result {
        Ok(path) => app.set_status(format!("{}: {}", i18n::tui_saved(), path.display())),
        Err(e) => {
            app.dialog = Some((
                i18n::tui_error().to_string(),
                format!("{}:\n{e:#}", i18n::tui_error_saving()),
            ));
        }
    }
}

fn save_all(app: &mut App, dir: &Path) {
    let result = match app.message.as_ref() {
        Some(message) => export::attachment::save_all_attachments(message, dir),
        None => return,
    };

    match result {
        Ok(paths) => app.set_status(format!(
            "{}: {} {} {}",
            i18n::tui_saved(),
            paths.len(),
            i18n::cli_attachments_to(),
            dir.display()
        )),
        Err(e) => {
            app.dialog = Some((
                i18n::tui_error().to_string(),
                format!("{}:\n{e:#}", i18n::tui_error_saving_all()),
            ));
        }
    }
}

// ── Panel helpers ─────────────────────────────────────────

fn cycle_focus(app: &mut App) {
    app.focus = match app.focus {
        PanelFocus::Body if app.has_attachments() => PanelFocus::Attachments,
        _ => PanelFocus::Body,
    };
}

fn toggle_headers(app: &mut App) {
    if app.message.is_none() {
        return;
    }
    app.show_full_headers = !app.show_full_headers;
    app.body_scroll = 0;
    if app.show_full_headers {
        app.focus = PanelFocus::Body;
    }
}

/// Gate attachment actions; shows a hint instead of a dead key.
fn ensure_attachments(app: &mut App) -> bool {
    if app.has_attachments() {
        return true;
    }
    if app.message.is_some() {
        app.set_status(i18n::tui_no_attachments_msg());
    }
    false
}

fn move_down(app: &mut App) {
    match app.focus {
        PanelFocus::Body => {
            app.body_scroll = (app.body_scroll + 1).min(app.max_body_scroll());
        }
        PanelFocus::Attachments => app.select_next_attachment(),
    }
}

fn move_up(app: &mut App) {
    match app.focus {
        PanelFocus::Body => {
            app.body_scroll = app.body_scroll.saturating_sub(1);
        }
        PanelFocus::Attachments => app.select_prev_attachment(),
    }
}

fn move_first(app: &mut App) {
    match app.focus {
        PanelFocus::Body => app.body_scroll = 0,
        PanelFocus::Attachments => app.select_first_attachment(),
    }
}

fn move_last(app: &mut App) {
    match app.focus {
        PanelFocus::Body => app.body_scroll = app.max_body_scroll(),
        PanelFocus::Attachments => app.select_last_attachment(),
    }
}

fn page_down(app: &mut App) {
    match app.focus {
        PanelFocus::Body => {
            let page = app.body_view_height.max(1);
            app.body_scroll = (app.body_scroll + page).min(app.max_body_scroll());
        }
        PanelFocus::Attachments => {
            for _ in 0..app.attachment_view_height.max(1) {
                app.select_next_attachment();
            }
        }
    }
}

fn page_up(app: &mut App) {
    match app.focus {
        PanelFocus::Body => {
            let page = app.body_view_height.max(1);
            app.body_scroll = app.body_scroll.saturating_sub(page);
        }
        PanelFocus::Attachments => {
            for _ in 0..app.attachment_view_height.max(1) {
                app.select_prev_attachment();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::attachment::Attachment;
    use crate::model::message::Message;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_attachments(n: usize) -> App {
        let mut app = App::new(Config::default());
        let mut message = Message::default();
        for i in 0..n {
            message.attachments.push(Attachment {
                name: Some(format!("file{i}.txt")),
                data: vec![b'x'],
                content_id: None,
                mime_type: None,
                is_embedded_message: false,
            });
        }
        app.message = Some(message);
        app
    }

    #[test]
    fn test_q_quits() {
        let mut app = App::new(Config::default());
        handle_key_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new(Config::default());
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_key_event(&mut app, ev).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = App::new(Config::default());
        handle_key_event(&mut app, key(KeyCode::Char('?'))).unwrap();
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(!app.show_help);
    }

    #[test]
    fn test_help_captures_quit_key() {
        let mut app = App::new(Config::default());
        app.show_help = true;
        handle_key_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        // q closes the popup instead of quitting
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_dialog_captures_all_keys() {
        let mut app = App::new(Config::default());
        app.dialog = Some(("Error".to_string(), "boom".to_string()));
        handle_key_event(&mut app, key(KeyCode::Char('j'))).unwrap();
        assert!(app.dialog.is_some());
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_tab_cycles_only_with_attachments() {
        let mut app = App::new(Config::default());
        handle_key_event(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, PanelFocus::Body);

        let mut app = app_with_attachments(1);
        handle_key_event(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, PanelFocus::Attachments);
        handle_key_event(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, PanelFocus::Body);
    }

    #[test]
    fn test_prompt_text_input() {
        let mut app = App::new(Config::default());
        handle_key_event(&mut app, key(KeyCode::Char('o'))).unwrap();
        assert!(app.prompt.is_some());

        for c in "/tmp/a.msg".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        assert_eq!(app.prompt.as_ref().unwrap().input, "/tmp/a.msg");

        handle_key_event(&mut app, key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.prompt.as_ref().unwrap().input, "/tmp/a.ms");

        handle_key_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(app.prompt.is_none());
    }

    #[test]
    fn test_prompt_submit_empty_is_cancel() {
        let mut app = App::new(Config::default());
        app.prompt = Some(PathPrompt {
            kind: PromptKind::Open,
            input: "   ".to_string(),
        });
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.prompt.is_none());
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_save_keys_need_attachments() {
        let mut app = app_with_attachments(0);
        handle_key_event(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert!(app.prompt.is_none());
        assert!(app.status_message.is_some());

        let mut app = app_with_attachments(1);
        handle_key_event(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert!(matches!(
            app.prompt.as_ref().map(|p| p.kind),
            Some(PromptKind::SaveAttachment)
        ));
    }

    #[test]
    fn test_save_all_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_attachments(2);
        app.prompt = Some(PathPrompt {
            kind: PromptKind::SaveAll,
            input: dir.path().to_string_lossy().into_owned(),
        });
        handle_key_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(dir.path().join("file0.txt").exists());
        assert!(dir.path().join("file1.txt").exists());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_attachment_navigation() {
        let mut app = app_with_attachments(3);
        app.focus = PanelFocus::Attachments;
        handle_key_event(&mut app, key(KeyCode::Char('j'))).unwrap();
        assert_eq!(app.attachment_selected, 1);
        handle_key_event(&mut app, key(KeyCode::Char('G'))).unwrap();
        assert_eq!(app.attachment_selected, 2);
        handle_key_event(&mut app, key(KeyCode::Char('j'))).unwrap();
        assert_eq!(app.attachment_selected, 2);
        handle_key_event(&mut app, key(KeyCode::Char('g'))).unwrap();
        assert_eq!(app.attachment_selected, 0);
    }

    #[test]
    fn test_body_scroll_clamped() {
        let mut app = App::new(Config::default());
        app.message = Some(Message::default());
        app.body = (0..20).map(|i| format!("line {i}\n")).collect();
        app.body_line_count = 20;
        app.body_view_height = 5;

        handle_key_event(&mut app, key(KeyCode::End)).unwrap();
        assert_eq!(app.body_scroll, 15);
        handle_key_event(&mut app, key(KeyCode::Char('j'))).unwrap();
        assert_eq!(app.body_scroll, 15);
        handle_key_event(&mut app, key(KeyCode::PageUp)).unwrap();
        assert_eq!(app.body_scroll, 10);
        handle_key_event(&mut app, key(KeyCode::Home)).unwrap();
        assert_eq!(app.body_scroll, 0);
    }

    #[test]
    fn test_headers_toggle_resets_scroll() {
        let mut app = App::new(Config::default());
        app.message = Some(Message {
            transport_headers: Some("Received: a\nFrom: b".to_string()),
            ..Message::default()
        });
        app.body_scroll = 4;
        handle_key_event(&mut app, key(KeyCode::Char('h'))).unwrap();
        assert!(app.show_full_headers);
        assert_eq!(app.body_scroll, 0);
        handle_key_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(!app.show_full_headers);
    }
}
