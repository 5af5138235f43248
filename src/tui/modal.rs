/// Modal host - the dialog collaborator for the terminal front end
///
/// Holds at most one open dialog. Keys are translated into edits of the
/// owning row's draft or into [`DialogAction`]s; the app routes both back to
/// the row, which decides whether the dialog closes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::settings::{ButtonKind, DialogAction, DialogBody, DialogRequest, DialogService, RowId};

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDialog {
    pub request: DialogRequest,
    /// Highlighted entry of a choice list
    pub highlighted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Backspace,
    Clear,
}

impl EditOp {
    pub fn apply(self, draft: &mut String) {
        match self {
            EditOp::Insert(c) => draft.push(c),
            EditOp::Backspace => {
                draft.pop();
            }
            EditOp::Clear => draft.clear(),
        }
    }
}

/// What a key means while a dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalInput {
    Edit(EditOp),
    Action(DialogAction),
    /// Handled inside the modal (or swallowed)
    Consumed,
}

#[derive(Debug, Default)]
pub struct ModalHost {
    active: Option<ActiveDialog>,
}

impl ModalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveDialog> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn owner(&self) -> Option<RowId> {
        self.active.as_ref().map(|a| a.request.owner)
    }

    /// Drop the dialog without consulting its owner
    pub fn close(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::debug!("MODAL: Force-closed dialog of row {}", active.request.owner);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ModalInput {
        let Some(active) = self.active.as_mut() else {
            return ModalInput::Consumed;
        };

        if key.code == KeyCode::Esc {
            return ModalInput::Action(DialogAction::Cancel);
        }

        match &active.request.body {
            DialogBody::Editor { .. } => match key.code {
                KeyCode::Enter => ModalInput::Action(DialogAction::Confirm),
                KeyCode::Backspace => ModalInput::Edit(EditOp::Backspace),
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    ModalInput::Edit(EditOp::Clear)
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    ModalInput::Edit(EditOp::Insert(c))
                }
                _ => ModalInput::Consumed,
            },
            DialogBody::Choices { entries, .. } => {
                let last = entries.len().saturating_sub(1);
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        active.highlighted = active.highlighted.saturating_sub(1);
                        ModalInput::Consumed
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        active.highlighted = (active.highlighted + 1).min(last);
                        ModalInput::Consumed
                    }
                    KeyCode::Enter | KeyCode::Char(' ') if !entries.is_empty() => {
                        ModalInput::Action(DialogAction::Choose(active.highlighted))
                    }
                    _ => ModalInput::Consumed,
                }
            }
            DialogBody::None => match key.code {
                KeyCode::Enter => {
                    let action = active
                        .request
                        .buttons
                        .iter()
                        .find(|b| b.kind == ButtonKind::Positive)
                        .map(|b| b.action)
                        .unwrap_or(DialogAction::Cancel);
                    ModalInput::Action(action)
                }
                _ => ModalInput::Consumed,
            },
        }
    }
}

impl DialogService for ModalHost {
    fn open(&mut self, request: DialogRequest) {
        if let Some(previous) = &self.active {
            tracing::warn!(
                "MODAL: Row {} opened a dialog over row {}'s",
                request.owner,
                previous.request.owner
            );
        }
        let highlighted = match &request.body {
            DialogBody::Choices { checked, .. } => checked.unwrap_or(0),
            _ => 0,
        };
        tracing::debug!("MODAL: Opened '{}' for row {}", request.title, request.owner);
        self.active = Some(ActiveDialog { request, highlighted });
    }

    fn dismiss(&mut self, owner: RowId) {
        if self.owner() == Some(owner) {
            tracing::debug!("MODAL: Dismissed dialog of row {}", owner);
            self.active = None;
        }
    }
}
