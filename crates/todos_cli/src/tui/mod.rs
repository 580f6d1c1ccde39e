//! Full-screen terminal view over the task store.

mod app;
mod theme;
mod view;

pub use app::{App, Focus};
pub use theme::Theme;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use todos_core::TaskStore;
use todos_core::error::AppError;
use todos_core::storage::Storage;
use tracing::debug;

/// Calls the wrapped closure when dropped.
struct Restore<F: FnMut()>(F);

impl<F: FnMut()> Drop for Restore<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        debug!(error = %err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
        debug!(error = %err, "failed to leave alternate screen");
    }
}

pub fn run<S: Storage>(store: TaskStore<S>, theme: Option<&str>) -> Result<(), AppError> {
    let mut app = App::new(store, Theme::from_name(theme));

    enable_raw_mode()?;
    let _restore = Restore(restore_terminal);
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run_loop(&mut terminal, &mut app);
    terminal.show_cursor()?;
    result
}

fn run_loop<S: Storage>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<(), AppError> {
    debug!("entering terminal view");
    while !app.should_quit() {
        terminal.draw(|frame| view::render(frame, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
    debug!("leaving terminal view");
    Ok(())
}
