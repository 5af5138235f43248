//! Terminal front end for the settings screen

pub mod app;
pub mod controller;
pub mod grid;
pub mod modal;
pub mod widgets;

#[cfg(test)]
pub mod testing;

#[cfg(test)]
mod integration_tests;

pub use app::{App, AppAction};
pub use controller::{ListController, Status};
pub use modal::{ModalHost, ModalInput};

use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::screen::SharedConfig;
use crate::settings::Resources;

/// Main entry point for TUI mode
pub fn run(
    config: SharedConfig,
    resources: Rc<dyn Resources>,
    config_path: Option<PathBuf>,
) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, resources, config_path);
    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), io::Error> {
    loop {
        if app.take_dirty() {
            terminal.draw(|f| {
                let area = f.area();
                app.render(area, f.buffer_mut());
            })?;
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key) == AppAction::Quit {
                    tracing::debug!("ACTION: Quitting application");
                    break;
                }
            }
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize(width, height) => {
                tracing::debug!("DRAW: Resized to {}x{}", width, height);
                app.mark_dirty();
            }
            _ => {}
        }
    }
    Ok(())
}
