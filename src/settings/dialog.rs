/// Dialog protocol between rows and the modal collaborator
///
/// A row describes the dialog it wants with a [`DialogRequest`] and hands it
/// to a [`DialogService`]. Button presses come back to the owning row as
/// [`DialogAction`]s, and the row answers with a [`DialogOutcome`] telling the
/// service whether the dialog may close.

use super::RowId;

/// Modal collaborator a row opens and dismisses dialogs through
pub trait DialogService {
    fn open(&mut self, request: DialogRequest);

    /// Close the dialog owned by `owner`, if it is open
    fn dismiss(&mut self, owner: RowId);
}

/// What a row asks the modal collaborator to show
#[derive(Debug, Clone, PartialEq)]
pub struct DialogRequest {
    pub owner: RowId,
    pub title: String,
    pub body: DialogBody,
    pub buttons: Vec<DialogButton>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogBody {
    None,
    /// Editable text seeded with `text`
    Editor { text: String, show_strip: bool },
    /// Single-choice list; choosing an entry is the commit
    Choices { entries: Vec<String>, checked: Option<usize> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogButton {
    pub kind: ButtonKind,
    pub label: String,
    pub action: DialogAction,
}

impl DialogButton {
    pub fn new(kind: ButtonKind, label: impl Into<String>, action: DialogAction) -> Self {
        Self {
            kind,
            label: label.into(),
            action,
        }
    }
}

/// User action routed back to the row that owns a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Confirm,
    /// Cancel button, Esc and back navigation all map here
    Cancel,
    Choose(usize),
}

/// The row's answer to a [`DialogAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// The action resolved the dialog and it was dismissed
    Dismissed,
    /// Dismissal is blocked; the dialog stays open
    Kept,
    /// The row had no open dialog or the action does not apply to it
    Ignored,
}

impl DialogOutcome {
    /// The "prevent dismiss" flag as seen by the modal collaborator
    pub fn prevents_dismiss(self) -> bool {
        matches!(self, DialogOutcome::Kept)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Committed,
    Cancelled,
}

/// Per-row dialog lifecycle: `Closed -> Open -> Resolved`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState<S> {
    #[default]
    Closed,
    Open(S),
    Resolved(Resolution),
}

impl<S> DialogState<S> {
    pub fn is_open(&self) -> bool {
        matches!(self, DialogState::Open(_))
    }

    pub fn session(&self) -> Option<&S> {
        match self {
            DialogState::Open(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut S> {
        match self {
            DialogState::Open(session) => Some(session),
            _ => None,
        }
    }

    pub fn resolution(&self) -> Option<Resolution> {
        match self {
            DialogState::Resolved(resolution) => Some(*resolution),
            _ => None,
        }
    }
}
