/// Testing utilities for widget rendering

use ratatui::{buffer::Buffer, style::Color};

use crate::config::DisplayConfig;

/// DisplayConfig with unicode glyphs and a fixed selection color
pub fn test_config() -> DisplayConfig {
    DisplayConfig {
        use_unicode: true,
        selection_fg: Color::Rgb(255, 200, 0),
        error_fg: Color::Red,
    }
}

/// Same as [`test_config`] with ASCII-only glyphs
pub fn test_config_ascii() -> DisplayConfig {
    DisplayConfig {
        use_unicode: false,
        ..test_config()
    }
}

/// Get the text content of a specific line in the buffer
pub fn buffer_line(buf: &Buffer, line: u16) -> String {
    let area = buf.area();
    (0..area.width).map(|x| buf[(area.x + x, line)].symbol()).collect()
}
