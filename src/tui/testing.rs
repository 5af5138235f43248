//! General test utilities for TUI tests.
//!
//! For widget-specific rendering helpers, see `crate::tui::widgets::testing`.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{buffer::Buffer, layout::Rect};

use crate::config::Config;
use crate::screen::SharedConfig;
use crate::settings::BundledResources;
use crate::tui::app::App;

/// Constant for general rendering width
pub const RENDER_WIDTH: u16 = 80;
pub const RENDER_HEIGHT: u16 = 30;

/// Helper to extract lines from buffer
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(area.x + x, area.y + y)].symbol())
                .collect::<String>()
        })
        .collect()
}

/// Helper for buffer assertions; trailing blanks are ignored
pub fn assert_buffer(buf: &Buffer, expected: &[&str]) {
    let actual = buffer_lines(buf);

    assert_eq!(
        actual.len(),
        expected.len(),
        "Buffer height mismatch: expected {} lines, got {}",
        expected.len(),
        actual.len()
    );
    for (i, expected_line) in expected.iter().enumerate() {
        assert_eq!(
            actual[i].trim_end(),
            expected_line.trim_end(),
            "Line {} mismatch:\nExpected: '{}'\nActual:   '{}'",
            i,
            expected_line,
            actual[i]
        );
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Left click as a down/up pair at the same point
pub fn click(column: u16, row: u16) -> [MouseEvent; 2] {
    [
        mouse(MouseEventKind::Down(MouseButton::Left), column, row),
        mouse(MouseEventKind::Up(MouseButton::Left), column, row),
    ]
}

/// App over a default config that is never written to disk
pub fn test_app() -> (SharedConfig, App) {
    test_app_with(Config::default())
}

pub fn test_app_with(config: Config) -> (SharedConfig, App) {
    let shared: SharedConfig = Rc::new(RefCell::new(config));
    let app = App::new(Rc::clone(&shared), Rc::new(BundledResources), None);
    (shared, app)
}

/// Render the app into a fresh buffer, refreshing its hit regions
pub fn render_app(app: &mut App) -> Buffer {
    let area = Rect::new(0, 0, RENDER_WIDTH, RENDER_HEIGHT);
    let mut buf = Buffer::empty(area);
    app.render(area, &mut buf);
    buf
}
