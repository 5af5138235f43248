/// InputRow - free-text row edited through a modal editor
///
/// Pressing opens an editor seeded with the current value. The draft is held
/// by the row while the dialog is open, so the validated result
/// (`intermediate`) is always computed from what the user has typed at the
/// moment of confirmation. The value changes in exactly one place: a confirm
/// whose intermediate is `Some`.

use std::fmt;
use std::rc::Rc;

use super::dialog::{
    ButtonKind, DialogAction, DialogBody, DialogButton, DialogOutcome, DialogRequest,
    DialogService, DialogState, Resolution,
};
use super::resources::{string_or, Resources, STR_CANCEL, STR_OK};
use super::value::{ValueRow, ValueSource};
use super::{notify_changed, InteractionCallback, LayoutKind, Origin, Row, RowBase};

/// Editor state while the dialog is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub draft: String,
    /// The last confirm was refused; cleared by the next edit
    pub rejected: bool,
}

type Validator = Box<dyn Fn(&str) -> Option<String>>;

pub struct InputRow {
    row: ValueRow<String>,
    resources: Rc<dyn Resources>,
    show_strip: bool,
    validator: Validator,
    dialog: DialogState<EditSession>,
}

impl InputRow {
    /// Any text is accepted unless a validator is set
    pub fn new(
        base: RowBase,
        source: impl ValueSource<String> + 'static,
        resources: Rc<dyn Resources>,
    ) -> Self {
        Self {
            row: ValueRow::new(base, source),
            resources,
            show_strip: true,
            validator: Box::new(|draft| Some(draft.to_string())),
            dialog: DialogState::Closed,
        }
    }

    /// Map the editor text to the value to commit, or `None` to refuse it
    pub fn with_validator(mut self, validator: impl Fn(&str) -> Option<String> + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn with_show_strip(mut self, show_strip: bool) -> Self {
        self.show_strip = show_strip;
        self
    }

    pub fn with_after_changed(mut self, hook: impl FnMut(&String) + 'static) -> Self {
        self.row = self.row.with_after_changed(hook);
        self
    }

    pub fn value(&self) -> String {
        self.row.value()
    }

    pub fn show_strip(&self) -> bool {
        self.show_strip
    }

    pub fn dialog_state(&self) -> &DialogState<EditSession> {
        &self.dialog
    }

    /// Editor text, while the dialog is open
    pub fn draft(&self) -> Option<&str> {
        self.dialog.session().map(|s| s.draft.as_str())
    }

    /// Apply an edit to the open draft; returns false if no dialog is open
    pub fn edit(&mut self, apply: impl FnOnce(&mut String)) -> bool {
        match self.dialog.session_mut() {
            Some(session) => {
                apply(&mut session.draft);
                session.rejected = false;
                true
            }
            None => false,
        }
    }

    /// Validated draft, computed fresh on every call
    pub fn intermediate(&self) -> Option<String> {
        self.draft().and_then(|draft| (self.validator)(draft))
    }

    pub fn confirm(
        &mut self,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        dialogs: &mut dyn DialogService,
    ) -> DialogOutcome {
        if !self.dialog.is_open() {
            tracing::warn!("SETTINGS: Confirm on row {} without an open editor", self.id());
            return DialogOutcome::Ignored;
        }

        match self.intermediate() {
            Some(result) => {
                tracing::debug!("SETTINGS: Committing row {} = {:?}", self.id(), result);
                self.row.set_value(result);
                self.dialog = DialogState::Resolved(Resolution::Committed);
                dialogs.dismiss(self.id());
                notify_changed(&*self, origin, callback);
                DialogOutcome::Dismissed
            }
            None => {
                tracing::debug!("SETTINGS: Rejected input for row {}", self.id());
                if let Some(session) = self.dialog.session_mut() {
                    session.rejected = true;
                }
                DialogOutcome::Kept
            }
        }
    }

    /// Close the editor without touching the value
    pub fn cancel(&mut self, dialogs: &mut dyn DialogService) -> DialogOutcome {
        if !self.dialog.is_open() {
            return DialogOutcome::Ignored;
        }
        tracing::debug!("SETTINGS: Cancelled editing row {}", self.id());
        self.dialog = DialogState::Resolved(Resolution::Cancelled);
        dialogs.dismiss(self.id());
        DialogOutcome::Dismissed
    }

    fn open_editor(&mut self, dialogs: &mut dyn DialogService) {
        let value = self.value();
        let resources = self.resources.as_ref();
        let request = DialogRequest {
            owner: self.id(),
            title: self.title().resolve(resources),
            body: DialogBody::Editor {
                text: value.clone(),
                show_strip: self.show_strip,
            },
            buttons: vec![
                DialogButton::new(
                    ButtonKind::Positive,
                    string_or(resources, STR_OK, "OK"),
                    DialogAction::Confirm,
                ),
                DialogButton::new(
                    ButtonKind::Negative,
                    string_or(resources, STR_CANCEL, "Cancel"),
                    DialogAction::Cancel,
                ),
            ],
        };
        self.dialog = DialogState::Open(EditSession {
            draft: value,
            rejected: false,
        });
        tracing::debug!("SETTINGS: Opened editor for row {}", self.id());
        dialogs.open(request);
    }
}

impl Row for InputRow {
    fn base(&self) -> &RowBase {
        self.row.base()
    }

    fn base_mut(&mut self) -> &mut RowBase {
        self.row.base_mut()
    }

    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Input
    }

    fn on_pressed(
        &mut self,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        dialogs: &mut dyn DialogService,
    ) {
        callback.on_item_pressed(origin, &*self);
        self.open_editor(dialogs);
    }
}

impl fmt::Debug for InputRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputRow")
            .field("base", self.base())
            .field("value", &self.value())
            .field("show_strip", &self.show_strip)
            .field("dialog", &self.dialog)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::testing::*;
    use crate::settings::{MemorySource, PropertyKey, Text};

    fn input(value: &str) -> InputRow {
        InputRow::new(
            RowBase::new(Text::literal("Name")),
            MemorySource::new(value.to_string()),
            test_resources(),
        )
        .with_validator(|draft| {
            let trimmed = draft.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
    }

    #[test]
    fn test_press_opens_seeded_editor() {
        let mut row = input("a");
        let mut callback = RecordingCallback::default();
        let mut dialogs = RecordingDialogs::default();

        row.on_pressed(&Origin::default(), &mut callback, &mut dialogs);

        assert_eq!(callback.kinds(), vec![CallbackEvent::Pressed]);
        assert_eq!(row.draft(), Some("a"));
        let request = dialogs.last().unwrap();
        assert_eq!(request.owner, row.id());
        assert_eq!(request.title, "Name");
        assert_eq!(
            request.body,
            DialogBody::Editor { text: "a".to_string(), show_strip: true }
        );
        let actions: Vec<DialogAction> = request.buttons.iter().map(|b| b.action).collect();
        assert_eq!(actions, vec![DialogAction::Confirm, DialogAction::Cancel]);
        assert_eq!(request.buttons[0].label, "OK");
    }

    #[test]
    fn test_confirm_valid_commits_once() {
        let mut row = input("a");
        let seen = record(&mut row);
        let mut callback = RecordingCallback::default();
        let mut dialogs = RecordingDialogs::default();
        let origin = Origin::default();

        row.on_pressed(&origin, &mut callback, &mut dialogs);
        row.edit(|draft| *draft = "b".to_string());
        assert_eq!(row.intermediate().as_deref(), Some("b"));

        let outcome = row.confirm(&origin, &mut callback, &mut dialogs);

        assert_eq!(outcome, DialogOutcome::Dismissed);
        assert_eq!(row.value(), "b");
        assert_eq!(callback.kinds(), vec![CallbackEvent::Pressed, CallbackEvent::Changed]);
        assert_eq!(*seen.borrow(), vec![PropertyKey::Value]);
        assert_eq!(dialogs.dismissed, vec![row.id()]);
        assert_eq!(row.dialog_state().resolution(), Some(Resolution::Committed));
    }

    #[test]
    fn test_confirm_invalid_keeps_dialog_open() {
        let mut row = input("a");
        let seen = record(&mut row);
        let mut callback = RecordingCallback::default();
        let mut dialogs = RecordingDialogs::default();
        let origin = Origin::default();

        row.on_pressed(&origin, &mut callback, &mut dialogs);
        row.edit(|draft| draft.clear());
        assert_eq!(row.intermediate(), None);

        let outcome = row.confirm(&origin, &mut callback, &mut dialogs);

        assert_eq!(outcome, DialogOutcome::Kept);
        assert!(outcome.prevents_dismiss());
        assert_eq!(row.value(), "a");
        assert!(row.dialog_state().is_open());
        assert_eq!(row.dialog_state().session().map(|s| s.rejected), Some(true));
        assert_eq!(callback.count(CallbackEvent::Changed), 0);
        assert!(dialogs.dismissed.is_empty());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_rejected_then_fixed_commits() {
        let mut row = input("a");
        let mut callback = RecordingCallback::default();
        let mut dialogs = RecordingDialogs::default();
        let origin = Origin::default();

        row.on_pressed(&origin, &mut callback, &mut dialogs);
        row.edit(|draft| *draft = "   ".to_string());
        assert_eq!(row.confirm(&origin, &mut callback, &mut dialogs), DialogOutcome::Kept);

        row.edit(|draft| draft.push_str("c "));
        assert_eq!(row.dialog_state().session().map(|s| s.rejected), Some(false));
        assert_eq!(row.confirm(&origin, &mut callback, &mut dialogs), DialogOutcome::Dismissed);

        assert_eq!(row.value(), "c");
        assert_eq!(callback.count(CallbackEvent::Changed), 1);
    }

    #[test]
    fn test_cancel_leaves_value_untouched() {
        let mut row = input("a");
        let seen = record(&mut row);
        let mut callback = RecordingCallback::default();
        let mut dialogs = RecordingDialogs::default();

        row.on_pressed(&Origin::default(), &mut callback, &mut dialogs);
        row.edit(|draft| *draft = "b".to_string());
        let outcome = row.cancel(&mut dialogs);

        assert_eq!(outcome, DialogOutcome::Dismissed);
        assert_eq!(row.value(), "a");
        assert_eq!(row.draft(), None);
        assert_eq!(row.dialog_state().resolution(), Some(Resolution::Cancelled));
        assert_eq!(callback.kinds(), vec![CallbackEvent::Pressed]);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_confirm_with_same_value_reports_change_without_notification() {
        let mut row = input("a");
        let seen = record(&mut row);
        let mut callback = RecordingCallback::default();
        let mut dialogs = RecordingDialogs::default();
        let origin = Origin::default();

        row.on_pressed(&origin, &mut callback, &mut dialogs);
        row.confirm(&origin, &mut callback, &mut dialogs);

        assert!(seen.borrow().is_empty());
        assert_eq!(callback.count(CallbackEvent::Changed), 1);
    }

    #[test]
    fn test_actions_without_open_dialog_are_ignored() {
        let mut row = input("a");
        let mut callback = RecordingCallback::default();
        let mut dialogs = RecordingDialogs::default();

        assert_eq!(row.confirm(&Origin::default(), &mut callback, &mut dialogs), DialogOutcome::Ignored);
        assert_eq!(row.cancel(&mut dialogs), DialogOutcome::Ignored);
        assert!(!row.edit(|draft| draft.push('x')));
        assert_eq!(row.intermediate(), None);
        assert!(callback.events.is_empty());
    }

    #[test]
    fn test_reopen_after_commit_seeds_new_value() {
        let mut row = input("a");
        let mut callback = RecordingCallback::default();
        let mut dialogs = RecordingDialogs::default();
        let origin = Origin::default();

        row.on_pressed(&origin, &mut callback, &mut dialogs);
        row.edit(|draft| *draft = "z".to_string());
        row.confirm(&origin, &mut callback, &mut dialogs);
        row.on_pressed(&origin, &mut callback, &mut dialogs);

        assert_eq!(row.draft(), Some("z"));
        assert_eq!(dialogs.opened.len(), 2);
    }

    #[test]
    fn test_show_strip_flows_into_request() {
        let mut row = input("a").with_show_strip(false);
        let mut dialogs = RecordingDialogs::default();

        row.on_pressed(&Origin::default(), &mut RecordingCallback::default(), &mut dialogs);

        assert!(matches!(
            dialogs.last().map(|r| &r.body),
            Some(DialogBody::Editor { show_strip: false, .. })
        ));
    }
}
