/// Editor modal - single-line text entry with an optional underline strip
/// and an inline hint when the last confirm was refused

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::{centered, render_buttons, tail, ModalLayout};
use crate::config::DisplayConfig;
use crate::settings::DialogButton;

pub struct EditorView<'a> {
    pub title: &'a str,
    pub draft: &'a str,
    pub show_strip: bool,
    pub rejected: bool,
    pub buttons: &'a [DialogButton],
}

pub fn render_editor_modal(
    view: &EditorView<'_>,
    area: Rect,
    buf: &mut Buffer,
    config: &DisplayConfig,
) -> ModalLayout {
    let width = (view.draft.width() + 6).max(view.title.width() + 6).max(40) as u16;
    // borders, input line, hint line, buttons
    let height = if view.show_strip { 6 } else { 5 };

    let modal = centered(width, height, area);
    Clear.render(modal, buf);
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.selection_fg))
        .title(format!(" {} ", view.title))
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

    let mut y = inner.y;
    let cursor = if config.use_unicode { "█" } else { "_" };
    let visible = tail(view.draft, inner.width.saturating_sub(3) as usize);
    buf.set_string(inner.x + 1, y, visible, Style::default());
    buf.set_string(
        inner.x + 1 + visible.width() as u16,
        y,
        cursor,
        Style::default().fg(config.selection_fg),
    );
    y += 1;

    if view.show_strip && y < inner.bottom() {
        let rule = if config.use_unicode { "─" } else { "-" };
        buf.set_string(
            inner.x + 1,
            y,
            rule.repeat(inner.width.saturating_sub(2) as usize),
            Style::default().fg(config.selection_fg),
        );
        y += 1;
    }

    if view.rejected && y < inner.bottom() {
        buf.set_string(inner.x + 1, y, "Invalid value", Style::default().fg(config.error_fg));
    }

    let hits = render_buttons(view.buttons, inner, inner.bottom() - 1, buf, config);
    ModalLayout { area: modal, hits }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ButtonKind, DialogAction};
    use crate::tui::testing::assert_buffer;
    use crate::tui::widgets::testing::{buffer_line, test_config, test_config_ascii};

    fn buttons() -> Vec<DialogButton> {
        vec![
            DialogButton::new(ButtonKind::Positive, "OK", DialogAction::Confirm),
            DialogButton::new(ButtonKind::Negative, "Cancel", DialogAction::Cancel),
        ]
    }

    fn view<'a>(draft: &'a str, show_strip: bool, rejected: bool, buttons: &'a [DialogButton]) -> EditorView<'a> {
        EditorView {
            title: "Name",
            draft,
            show_strip,
            rejected,
            buttons,
        }
    }

    #[test]
    fn test_editor_with_strip() {
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        let buttons = buttons();

        let layout = render_editor_modal(&view("Ada", true, false, &buttons), area, &mut buf, &test_config());

        assert_eq!(layout.area, area);
        assert_buffer(
            &buf,
            &[
                "┌ Name ────────────────────────────────┐",
                "│ Ada█                                 │",
                "│ ──────────────────────────────────── │",
                "│                                      │",
                "│                        [OK] [Cancel] │",
                "└──────────────────────────────────────┘",
            ],
        );
        assert_eq!(layout.action_at(26, 4), Some(DialogAction::Confirm));
        assert_eq!(layout.action_at(32, 4), Some(DialogAction::Cancel));
    }

    #[test]
    fn test_editor_rejected_without_strip() {
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        let buttons = buttons();

        render_editor_modal(&view("x", false, true, &buttons), area, &mut buf, &test_config_ascii());

        assert_eq!(buffer_line(&buf, 1).trim_end(), "│ x_                                   │");
        assert_eq!(buffer_line(&buf, 2).trim_end(), "│ Invalid value                        │");
        assert_eq!(buf[(2, 2)].fg, test_config_ascii().error_fg);
    }

    #[test]
    fn test_editor_long_draft_shows_tail() {
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        let draft = "abcdefghijklmnopqrstuvwxyz".repeat(3);

        render_editor_modal(&view(&draft, false, false, &[]), area, &mut buf, &test_config_ascii());

        assert_eq!(buffer_line(&buf, 1), "│ lmnopqrstuvwxyz_ │");
    }
}
