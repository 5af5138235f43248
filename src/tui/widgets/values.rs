/// Value widgets drawn at the right edge of a row
///
/// Each renderer takes the column just past its last cell (`right`) and
/// returns the width consumed.

use ratatui::{
    buffer::Buffer,
    style::{Color, Style},
};
use unicode_width::UnicodeWidthStr;

use super::truncate;
use crate::config::DisplayConfig;

/// Renders a checkbox: `[✔]`, `[X]` or `[ ]`
pub fn render_checkbox(
    value: bool,
    enabled: bool,
    right: u16,
    y: u16,
    buf: &mut Buffer,
    config: &DisplayConfig,
) -> u16 {
    let x = right.saturating_sub(3);
    if value {
        let check = if config.use_unicode { "✔" } else { "X" };
        let fg = if enabled { config.selection_fg } else { Color::DarkGray };
        buf.set_string(x, y, "[", Style::default());
        buf.set_string(x + 1, y, check, Style::default().fg(fg));
        buf.set_string(x + 2, y, "]", Style::default());
    } else {
        buf.set_string(x, y, "[ ]", Style::default());
    }
    3
}

/// Renders a text value, or a dimmed placeholder when it is empty
pub fn render_text_value(
    value: &str,
    max_width: u16,
    style: Style,
    right: u16,
    y: u16,
    buf: &mut Buffer,
    config: &DisplayConfig,
) -> u16 {
    let (text, style) = if value.is_empty() {
        ("(not set)".to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (truncate(value, max_width as usize, config.use_unicode), style)
    };
    let width = text.width() as u16;
    buf.set_string(right.saturating_sub(width), y, &text, style);
    width
}

/// Renders the selected entry of a selector as `▼ entry`
pub fn render_choice_value(
    entry: Option<&str>,
    max_width: u16,
    style: Style,
    right: u16,
    y: u16,
    buf: &mut Buffer,
    config: &DisplayConfig,
) -> u16 {
    let arrow = if config.use_unicode { "▼" } else { "v" };
    let entry = truncate(entry.unwrap_or("?"), max_width.saturating_sub(2) as usize, config.use_unicode);
    let text = format!("{} {}", arrow, entry);
    let width = text.width() as u16;
    buf.set_string(right.saturating_sub(width), y, &text, style);
    width
}
