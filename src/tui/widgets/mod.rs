/// Rendering for the settings screen
///
/// Widgets draw straight into a ratatui [`Buffer`] and report the area or
/// width they consumed, so the app can reuse it for hit testing.

#[cfg(test)]
pub mod testing;

pub mod choice_modal;
pub mod editor_modal;
pub mod icons;
pub mod row;
pub mod status_bar;
pub mod values;

pub use choice_modal::render_choice_modal;
pub use editor_modal::{render_editor_modal, EditorView};
pub use icons::icon_glyph;
pub use row::{render_row, row_height};
pub use status_bar::{render_status_bar, KeyHint};

use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::DisplayConfig;
use crate::settings::{DialogAction, DialogButton};

/// Where a modal landed and which regions map to which dialog action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalLayout {
    pub area: Rect,
    pub hits: Vec<(Rect, DialogAction)>,
}

impl ModalLayout {
    pub fn action_at(&self, x: u16, y: u16) -> Option<DialogAction> {
        self.hits
            .iter()
            .find(|(r, _)| x >= r.x && x < r.right() && y >= r.y && y < r.bottom())
            .map(|(_, action)| *action)
    }
}

/// Center a box of the given size inside `area`, shrinking it to fit
pub fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Cut `text` to `max_width` columns, marking the cut with an ellipsis
pub fn truncate(text: &str, max_width: usize, use_unicode: bool) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let ellipsis = if use_unicode { "…" } else { "..." };
    let budget = max_width.saturating_sub(ellipsis.width());
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    if max_width >= ellipsis.width() {
        out.push_str(ellipsis);
    }
    out
}

/// Keep the end of `text` so it fits in `max_width` columns
pub fn tail(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = i;
    }
    &text[start..]
}

pub fn button_label(button: &DialogButton) -> String {
    format!("[{}]", button.label)
}

/// Render dialog buttons right-aligned on line `y` of `inner`
///
/// Returns the hit region of each button.
pub fn render_buttons(
    buttons: &[DialogButton],
    inner: Rect,
    y: u16,
    buf: &mut Buffer,
    config: &DisplayConfig,
) -> Vec<(Rect, DialogAction)> {
    let labels: Vec<String> = buttons.iter().map(button_label).collect();
    let total: usize = labels.iter().map(|l| l.width()).sum::<usize>() + labels.len().saturating_sub(1);
    let mut x = inner.right().saturating_sub(total as u16 + 1).max(inner.x);

    let mut hits = Vec::with_capacity(buttons.len());
    for (button, label) in buttons.iter().zip(&labels) {
        let width = label.width() as u16;
        if x + width > inner.right() {
            break;
        }
        buf.set_string(x, y, label, Style::default().fg(config.selection_fg));
        hits.push((Rect::new(x, y, width, 1), button.action));
        x += width + 1;
    }
    hits
}
