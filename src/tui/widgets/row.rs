/// Row widget - renders one settings row by its layout kind
///
/// Value rows compose: margin + selection indicator + icon + title on the
/// first line, the value right-aligned on the same line, and the
/// description dimmed on the second line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use super::values::{render_checkbox, render_choice_value, render_text_value};
use super::{icon_glyph, truncate};
use crate::config::DisplayConfig;
use crate::settings::{LayoutKind, Resources, Row, SettingsItem};

const MARGIN: u16 = 1;

pub fn row_height(item: &SettingsItem) -> u16 {
    match item.layout_kind() {
        LayoutKind::Blank | LayoutKind::Section => 1,
        LayoutKind::Toggle | LayoutKind::Input | LayoutKind::Selector => 2,
    }
}

pub fn render_row(
    item: &SettingsItem,
    resources: &dyn Resources,
    is_selected: bool,
    area: Rect,
    buf: &mut Buffer,
    config: &DisplayConfig,
) {
    if area.height == 0 || area.width <= MARGIN * 2 {
        return;
    }
    match item.layout_kind() {
        LayoutKind::Blank => {}
        LayoutKind::Section => render_section(&item.title().resolve(resources), area, buf, config),
        LayoutKind::Toggle | LayoutKind::Input | LayoutKind::Selector => {
            render_value_row(item, resources, is_selected, area, buf, config)
        }
    }
}

fn render_section(title: &str, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
    let rule = if config.use_unicode { "─" } else { "-" };
    let head = format!("{} {} ", rule.repeat(2), title);
    let fill = (area.width - MARGIN * 2).saturating_sub(head.width() as u16) as usize;
    let line = format!("{}{}", head, rule.repeat(fill));
    let line = truncate(&line, (area.width - MARGIN * 2) as usize, config.use_unicode);
    buf.set_string(
        area.x + MARGIN,
        area.y,
        &line,
        Style::default().fg(config.selection_fg).add_modifier(Modifier::BOLD),
    );
}

fn render_value_row(
    item: &SettingsItem,
    resources: &dyn Resources,
    is_selected: bool,
    area: Rect,
    buf: &mut Buffer,
    config: &DisplayConfig,
) {
    let enabled = item.is_enabled();
    let text_style = if enabled {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let y = area.y;
    let right = area.right() - MARGIN;
    let mut x = area.x + MARGIN;

    let selector = if config.use_unicode { "► " } else { "> " };
    if is_selected {
        buf.set_string(x, y, selector, Style::default().fg(config.selection_fg));
    }
    x += 2;

    if let Some(icon) = item.base().icon() {
        buf.set_string(x, y, icon_glyph(icon, config.use_unicode), text_style);
        x += 2;
    }

    // The value may take up to half the row
    let max_value = (area.width / 2).max(3);
    let value_width = match item {
        SettingsItem::Toggle(row) => render_checkbox(row.value(), enabled, right, y, buf, config),
        SettingsItem::Input(row) => {
            render_text_value(&row.value(), max_value, text_style, right, y, buf, config)
        }
        SettingsItem::Selector(row) => render_choice_value(
            row.selected_entry().as_deref(),
            max_value,
            text_style,
            right,
            y,
            buf,
            config,
        ),
        SettingsItem::Blank(_) | SettingsItem::Section(_) => 0,
    };

    let title_room = right.saturating_sub(value_width + 1).saturating_sub(x) as usize;
    let title = truncate(&item.title().resolve(resources), title_room, config.use_unicode);
    let title_style = if is_selected && enabled {
        text_style.add_modifier(Modifier::BOLD)
    } else {
        text_style
    };
    buf.set_string(x, y, &title, title_style);

    let description = item.description().resolve(resources);
    if area.height > 1 && !description.is_empty() {
        let indent = area.x + MARGIN + 2;
        let room = right.saturating_sub(indent) as usize;
        buf.set_string(
            indent,
            y + 1,
            truncate(&description, room, config.use_unicode),
            Style::default().fg(Color::DarkGray),
        );
    }
}
