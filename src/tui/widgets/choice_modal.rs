/// Choice modal - centered single-choice list with a radio mark on the
/// checked entry and a selector on the highlighted one

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::{button_label, centered, render_buttons, truncate, ModalLayout};
use crate::config::DisplayConfig;
use crate::settings::{DialogAction, DialogButton};

pub fn render_choice_modal(
    title: &str,
    entries: &[String],
    checked: Option<usize>,
    highlighted: usize,
    buttons: &[DialogButton],
    area: Rect,
    buf: &mut Buffer,
    config: &DisplayConfig,
) -> ModalLayout {
    let entry_width = entries.iter().map(|e| e.width()).max().unwrap_or(0);
    let buttons_width: usize = buttons.iter().map(|b| button_label(b).width() + 1).sum();
    let width = (entry_width + 10)
        .max(title.width() + 6)
        .max(buttons_width + 3)
        .max(20) as u16;
    // borders, spacer and button line
    let height = entries.len() as u16 + 4;

    let modal = centered(width, height, area);
    Clear.render(modal, buf);
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.selection_fg))
        .title(format!(" {} ", title))
        .render(modal, buf);

    let inner = Rect {
        x: modal.x + 1,
        y: modal.y + 1,
        width: modal.width.saturating_sub(2),
        height: modal.height.saturating_sub(2),
    };
    if inner.height == 0 {
        return ModalLayout { area: modal, hits: Vec::new() };
    }

    let selector = if config.use_unicode { "►" } else { ">" };
    let list_bottom = inner.bottom().saturating_sub(2);
    let mut hits = Vec::with_capacity(entries.len() + buttons.len());

    for (idx, entry) in entries.iter().enumerate() {
        let y = inner.y + idx as u16;
        if y >= list_bottom {
            break;
        }

        let is_highlighted = idx == highlighted;
        let radio = match (checked == Some(idx), config.use_unicode) {
            (true, true) => "(•)",
            (true, false) => "(*)",
            (false, _) => "( )",
        };
        let style = if is_highlighted {
            Style::default().fg(config.selection_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        if is_highlighted {
            buf.set_string(inner.x + 1, y, selector, Style::default().fg(config.selection_fg));
        }
        buf.set_string(inner.x + 3, y, radio, style);
        let room = inner.width.saturating_sub(8) as usize;
        buf.set_string(inner.x + 7, y, truncate(entry, room, config.use_unicode), style);

        hits.push((Rect::new(inner.x, y, inner.width, 1), DialogAction::Choose(idx)));
    }

    hits.extend(render_buttons(buttons, inner, inner.bottom() - 1, buf, config));
    ModalLayout { area: modal, hits }
}
