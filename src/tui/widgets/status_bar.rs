/// StatusBar widget - separator line, then the status message on the left
/// and keyboard hints on the right
///
/// Error messages are drawn with the error color.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};
use unicode_width::UnicodeWidthStr;

use super::truncate;
use crate::config::DisplayConfig;

/// A keyboard hint, e.g. "Enter Change"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }

    fn width(&self) -> usize {
        self.key.width() + 1 + self.action.width()
    }
}

/// Renders the two-line status bar; does nothing if `area` is shorter
pub fn render_status_bar(
    message: Option<(&str, bool)>,
    hints: &[KeyHint],
    area: Rect,
    buf: &mut Buffer,
    config: &DisplayConfig,
) {
    if area.height < 2 || area.width < 2 {
        return;
    }

    let rule = if config.use_unicode { "─" } else { "-" };
    buf.set_string(
        area.x,
        area.y,
        rule.repeat(area.width as usize),
        Style::default().fg(Color::DarkGray),
    );

    let y = area.y + 1;
    let hints_width: usize = hints.iter().map(|h| h.width() + 2).sum::<usize>().saturating_sub(2);
    let mut x = area.right().saturating_sub(hints_width as u16 + 1).max(area.x);
    let hints_start = x;
    for hint in hints {
        if x + hint.width() as u16 > area.right() {
            break;
        }
        buf.set_string(x, y, hint.key, Style::default().fg(config.selection_fg));
        buf.set_string(x + hint.key.width() as u16 + 1, y, hint.action, Style::default());
        x += hint.width() as u16 + 2;
    }

    if let Some((text, is_error)) = message {
        let style = if is_error {
            Style::default().fg(config.error_fg)
        } else {
            Style::default()
        };
        let room = hints_start.saturating_sub(area.x + 2) as usize;
        buf.set_string(area.x + 1, y, truncate(text, room, config.use_unicode), style);
    }
}
