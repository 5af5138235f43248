/// Settings screen state and input routing
///
/// The app owns the rows, the list controller and the modal host. Keys and
/// mouse events become presses, touch phases, draft edits or dialog
/// actions on the owning row; after every interaction that changed
/// something, all rows refresh their derived state.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use super::controller::ListController;
use super::grid::{self, Placement};
use super::modal::{ModalHost, ModalInput};
use super::widgets::{self, EditorView, KeyHint, ModalLayout};
use crate::config::DisplayConfig;
use crate::screen::{build_rows, theme_value, SharedConfig};
use crate::settings::{
    DialogAction, DialogBody, DialogOutcome, LayoutKind, Origin, Resources, Row, SettingsItem,
    TouchPhase,
};

const LIST_HINTS: [KeyHint; 3] = [
    KeyHint::new("↑↓", "Move"),
    KeyHint::new("Enter", "Change"),
    KeyHint::new("q", "Quit"),
];
const EDITOR_HINTS: [KeyHint; 2] = [KeyHint::new("Enter", "OK"), KeyHint::new("Esc", "Cancel")];
const CHOICE_HINTS: [KeyHint; 3] = [
    KeyHint::new("↑↓", "Move"),
    KeyHint::new("Enter", "Choose"),
    KeyHint::new("Esc", "Cancel"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

fn is_focusable(item: &SettingsItem) -> bool {
    matches!(
        item.layout_kind(),
        LayoutKind::Toggle | LayoutKind::Input | LayoutKind::Selector
    )
}

pub struct App {
    items: Vec<SettingsItem>,
    controller: ListController,
    modal: ModalHost,
    resources: Rc<dyn Resources>,
    config: SharedConfig,
    selected: usize,
    scroll: u16,
    /// Screen rect of each row as of the last render
    row_rects: Vec<Option<Rect>>,
    modal_layout: ModalLayout,
    /// Set by row notifications and input, cleared by the draw loop
    dirty: Rc<Cell<bool>>,
    /// Row under an unfinished mouse press
    touch: Option<usize>,
}

impl App {
    pub fn new(config: SharedConfig, resources: Rc<dyn Resources>, config_path: Option<PathBuf>) -> Self {
        let mut items = build_rows(&config, Rc::clone(&resources));
        let dirty = Rc::new(Cell::new(true));

        for item in items.iter_mut() {
            let flag = Rc::clone(&dirty);
            let id = item.id();
            item.base_mut().observable_mut().subscribe(move |key| {
                tracing::trace!("SCREEN: Row {} published {}", id, key);
                flag.set(true);
            });
        }

        let selected = items.iter().position(is_focusable).unwrap_or(0);
        tracing::debug!("SCREEN: Built {} rows", items.len());

        Self {
            items,
            controller: ListController::new(Rc::clone(&config), Rc::clone(&resources), config_path),
            modal: ModalHost::new(),
            resources,
            config,
            selected,
            scroll: 0,
            row_rects: Vec::new(),
            modal_layout: ModalLayout::default(),
            dirty,
            touch: None,
        }
    }

    pub fn items(&self) -> &[SettingsItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn modal(&self) -> &ModalHost {
        &self.modal
    }

    pub fn controller(&self) -> &ListController {
        &self.controller
    }

    pub fn row_rect(&self, index: usize) -> Option<Rect> {
        self.row_rects.get(index).copied().flatten()
    }

    pub fn modal_layout(&self) -> &ModalLayout {
        &self.modal_layout
    }

    /// Whether a redraw is due; clears the flag
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        self.dirty.set(true);

        if self.modal.is_open() {
            self.handle_modal_key(key);
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return AppAction::Quit
            }
            KeyCode::Up | KeyCode::Char('k') => self.step_line(false),
            KeyCode::Down | KeyCode::Char('j') => self.step_line(true),
            KeyCode::Left | KeyCode::Char('h') => self.step(false),
            KeyCode::Right | KeyCode::Char('l') => self.step(true),
            KeyCode::Enter | KeyCode::Char(' ') => self.press(self.selected),
            _ => {}
        }
        AppAction::Continue
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.dirty.set(true);

        if self.modal.is_open() {
            if mouse.kind == MouseEventKind::Up(MouseButton::Left) {
                if let Some(action) = self.modal_layout.action_at(mouse.column, mouse.row) {
                    self.dispatch_modal(action);
                }
            }
            return;
        }

        let hit = grid::hit(&self.row_rects, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.touch = hit;
                if let Some(index) = hit {
                    if is_focusable(&self.items[index]) {
                        self.selected = index;
                    }
                    self.touch_row(index, TouchPhase::Down);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(index) = self.touch {
                    if hit == Some(index) {
                        self.touch_row(index, TouchPhase::Move);
                    } else {
                        self.touch_row(index, TouchPhase::Cancel);
                        self.touch = None;
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(index) = self.touch.take() {
                    if hit != Some(index) {
                        self.touch_row(index, TouchPhase::Cancel);
                    } else if !self.touch_row(index, TouchPhase::Up) {
                        self.press(index);
                    }
                }
            }
            MouseEventKind::ScrollUp => self.step_line(false),
            MouseEventKind::ScrollDown => self.step_line(true),
            _ => {}
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if area.height < 4 {
            return;
        }
        let display = self.display_config();
        let body = Rect::new(area.x, area.y + 1, area.width, area.height - 3);
        let footer = Rect::new(area.x, area.bottom() - 2, area.width, 2);

        buf.set_string(
            area.x + 1,
            area.y,
            "Settings",
            Style::default().fg(display.selection_fg).add_modifier(Modifier::BOLD),
        );

        self.render_rows(body, buf, &display);

        let status = self.controller.status().map(|s| (s.text.as_str(), s.is_error));
        let hints: &[KeyHint] = match self.modal.active().map(|a| &a.request.body) {
            Some(DialogBody::Editor { .. }) => &EDITOR_HINTS,
            Some(DialogBody::Choices { .. }) => &CHOICE_HINTS,
            _ => &LIST_HINTS,
        };
        widgets::render_status_bar(status, hints, footer, buf, &display);

        self.modal_layout = self.render_modal(area, buf, &display);
    }

    fn display_config(&self) -> DisplayConfig {
        let config = self.config.borrow();
        let theme = theme_value(&config, &*self.resources);
        config.display(theme.as_deref())
    }

    fn placements(&self) -> Vec<Placement> {
        let spans: Vec<bool> = self.items.iter().map(|item| item.is_full_span()).collect();
        grid::place(&spans, self.config.borrow().columns)
    }

    fn render_rows(&mut self, body: Rect, buf: &mut Buffer, display: &DisplayConfig) {
        let columns = self.config.borrow().columns;
        let heights: Vec<u16> = self.items.iter().map(widgets::row_height).collect();
        let rects = grid::cell_rects(&self.placements(), &heights, columns, body.width);

        if let Some(selected) = rects.get(self.selected) {
            self.scroll = grid::scroll_to_show(*selected, self.scroll, body.height);
        }
        self.row_rects = rects
            .iter()
            .map(|rect| grid::to_screen(*rect, body, self.scroll))
            .collect();

        let show_selection = !self.modal.is_open();
        for (index, (item, rect)) in self.items.iter().zip(&self.row_rects).enumerate() {
            if let Some(rect) = rect {
                let is_selected = show_selection && index == self.selected;
                widgets::render_row(item, &*self.resources, is_selected, *rect, buf, display);
            }
        }
    }

    fn render_modal(&self, area: Rect, buf: &mut Buffer, display: &DisplayConfig) -> ModalLayout {
        let Some(active) = self.modal.active() else {
            return ModalLayout::default();
        };
        let request = &active.request;

        match &request.body {
            DialogBody::Editor { show_strip, .. } => {
                let session = self
                    .modal_owner_index()
                    .and_then(|index| self.items[index].as_input())
                    .and_then(|row| row.dialog_state().session());
                let view = EditorView {
                    title: &request.title,
                    draft: session.map_or("", |s| s.draft.as_str()),
                    show_strip: *show_strip,
                    rejected: session.is_some_and(|s| s.rejected),
                    buttons: &request.buttons,
                };
                widgets::render_editor_modal(&view, area, buf, display)
            }
            DialogBody::Choices { entries, checked } => widgets::render_choice_modal(
                &request.title,
                entries,
                *checked,
                active.highlighted,
                &request.buttons,
                area,
                buf,
                display,
            ),
            DialogBody::None => widgets::render_choice_modal(
                &request.title,
                &[],
                None,
                0,
                &request.buttons,
                area,
                buf,
                display,
            ),
        }
    }

    fn origin(&self, index: usize) -> Origin {
        let (x, y) = self.row_rect(index).map_or((0, 0), |r| (r.x, r.y));
        Origin::new(index, x, y)
    }

    fn step(&mut self, forward: bool) {
        let next = if forward {
            (self.selected + 1..self.items.len()).find(|&i| is_focusable(&self.items[i]))
        } else {
            (0..self.selected).rev().find(|&i| is_focusable(&self.items[i]))
        };
        if let Some(index) = next {
            self.selected = index;
        }
    }

    /// Move to the nearest focusable row on the next or previous grid line
    fn step_line(&mut self, forward: bool) {
        let placements = self.placements();
        let Some(current) = placements.get(self.selected).copied() else {
            return;
        };
        let focusable: Vec<Placement> = placements
            .into_iter()
            .filter(|p| is_focusable(&self.items[p.index]))
            .collect();

        let target_line = if forward {
            focusable.iter().map(|p| p.line).filter(|&l| l > current.line).min()
        } else {
            focusable.iter().map(|p| p.line).filter(|&l| l < current.line).max()
        };
        let Some(line) = target_line else {
            return;
        };

        if let Some(target) = focusable
            .iter()
            .filter(|p| p.line == line)
            .min_by_key(|p| p.column.abs_diff(current.column))
        {
            self.selected = target.index;
        }
    }

    fn press(&mut self, index: usize) {
        let origin = self.origin(index);
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if !item.is_enabled() {
            tracing::debug!("SCREEN: Ignoring press on disabled row {}", item.id());
            return;
        }
        item.on_pressed(&origin, &mut self.controller, &mut self.modal);
        self.after_interaction();
    }

    /// Returns true if the row consumed the phase; disabled rows swallow it
    fn touch_row(&mut self, index: usize, phase: TouchPhase) -> bool {
        let origin = self.origin(index);
        let item = &mut self.items[index];
        if !item.is_enabled() {
            return true;
        }
        let consumed = item.on_touched(&origin, &mut self.controller, phase);
        self.after_interaction();
        consumed
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match self.modal.handle_key(key) {
            ModalInput::Edit(op) => {
                if let Some(index) = self.modal_owner_index() {
                    if let Some(input) = self.items[index].as_input_mut() {
                        input.edit(|draft| op.apply(draft));
                    }
                }
            }
            ModalInput::Action(action) => self.dispatch_modal(action),
            ModalInput::Consumed => {}
        }
    }

    fn modal_owner_index(&self) -> Option<usize> {
        let owner = self.modal.owner()?;
        self.items.iter().position(|item| item.id() == owner)
    }

    fn dispatch_modal(&mut self, action: DialogAction) {
        let Some(index) = self.modal_owner_index() else {
            tracing::warn!("SCREEN: Dialog has no owning row, closing it");
            self.modal.close();
            return;
        };
        let origin = self.origin(index);
        let outcome =
            self.items[index].on_dialog_action(action, &origin, &mut self.controller, &mut self.modal);
        tracing::debug!("SCREEN: {:?} on row {} -> {:?}", action, self.items[index].id(), outcome);

        // A cancel the row did not expect must still close the dialog
        if outcome == DialogOutcome::Ignored && action == DialogAction::Cancel {
            self.modal.close();
        }
        self.after_interaction();
    }

    fn after_interaction(&mut self) {
        if self.controller.take_pending_refresh() {
            for item in self.items.iter_mut() {
                item.refresh();
            }
        }
    }
}
