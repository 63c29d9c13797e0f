//! Terminal UI entry point and event loop.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{poll as ct_poll, read as ct_read, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use ratatui_image::picker::Picker;
use tracing::debug;

use self::app::App;
use crate::config::Config;

/// Run the TUI application. Blocks until the user quits.
pub fn run_tui(path: Option<PathBuf>, config: Config) -> anyhow::Result<()> {
    theme::set_theme(theme::Theme::named(&config.display.theme));

    // Query the terminal for graphics support BEFORE raw mode; the
    // probe reads a reply that needs a cooked terminal.
    let picker = if config.display.show_preview {
        let picker = Picker::from_query_stdio().ok();
        if picker.is_none() {
            debug!("Terminal graphics query failed; previews fall back to labels");
        }
        picker
    } else {
        None
    };

    let mut app = App::new(config);
    app.set_picker(picker);
    if let Some(path) = path {
        app.load_file(&path);
    }

    // Setup terminal (alternate screen)
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the event loop
    let result = run_event_loop(&mut terminal, app);

    // Restore terminal (always, even on error)
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop: render, poll, handle, repeat.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        // Render
        terminal.draw(|frame| {
            ui::render(frame, &mut app);
        })?;

        // Poll for events
        if ct_poll(tick_rate)? {
            if let Event::Key(key) = ct_read()? {
                event::handle_key_event(&mut app, key)?;
            }
        }

        // Periodic housekeeping
        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
