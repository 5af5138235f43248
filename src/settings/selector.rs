/// SelectorRow - single choice from a resource-backed list
///
/// The value is an index into `entries`; `entry_values` is the parallel array
/// of stored values. Both arrays are resolved on every read and are empty
/// when their id is unset or unknown, which also disables the row's dialog.

use std::fmt;
use std::rc::Rc;

use super::dialog::{
    ButtonKind, DialogAction, DialogBody, DialogButton, DialogOutcome, DialogRequest,
    DialogService, DialogState, Resolution,
};
use super::observable::PropertyKey;
use super::resources::{string_array_or_empty, string_or, Resources, Text, STR_CANCEL};
use super::value::{ValueRow, ValueSource};
use super::{notify_changed, InteractionCallback, LayoutKind, Origin, Row, RowBase};

/// Properties derived from the selected index
const DERIVED_KEYS: [PropertyKey; 2] = [PropertyKey::SelectedEntry, PropertyKey::Description];

pub struct SelectorRow {
    row: ValueRow<usize>,
    resources: Rc<dyn Resources>,
    entries_res: Option<&'static str>,
    entry_values_res: Option<&'static str>,
    dialog: DialogState<()>,
    /// Selected entry as of the last publication of the derived keys
    shown_entry: Option<String>,
}

impl SelectorRow {
    pub fn new(
        base: RowBase,
        source: impl ValueSource<usize> + 'static,
        resources: Rc<dyn Resources>,
    ) -> Self {
        Self {
            row: ValueRow::new(base, source),
            resources,
            entries_res: None,
            entry_values_res: None,
            dialog: DialogState::Closed,
            shown_entry: None,
        }
    }

    /// Array resource ids for the display entries and their stored values
    pub fn with_entries(mut self, entries: &'static str, entry_values: &'static str) -> Self {
        self.entries_res = Some(entries);
        self.entry_values_res = Some(entry_values);
        self.shown_entry = self.selected_entry();
        self
    }

    pub fn with_after_changed(mut self, hook: impl FnMut(&usize) + 'static) -> Self {
        self.row = self.row.with_after_changed(hook);
        self
    }

    pub fn value(&self) -> usize {
        self.row.value()
    }

    /// Every write publishes the derived properties along with the value
    pub fn set_value(&mut self, index: usize) -> bool {
        let changed = self.row.set_value_with(index, &DERIVED_KEYS);
        if changed {
            self.shown_entry = self.selected_entry();
        }
        changed
    }

    pub fn entries(&self) -> Vec<String> {
        string_array_or_empty(self.resources.as_ref(), self.entries_res)
    }

    pub fn entry_values(&self) -> Vec<String> {
        string_array_or_empty(self.resources.as_ref(), self.entry_values_res)
    }

    /// `entries[value]`, or `None` when the index is out of range
    pub fn selected_entry(&self) -> Option<String> {
        self.entries().get(self.value()).cloned()
    }

    /// `entry_values[value]`, or `None` when the index is out of range
    pub fn selected_entry_value(&self) -> Option<String> {
        self.entry_values().get(self.value()).cloned()
    }

    pub fn dialog_state(&self) -> &DialogState<()> {
        &self.dialog
    }

    /// Commit the entry at `index` and close the dialog
    pub fn choose(
        &mut self,
        index: usize,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        dialogs: &mut dyn DialogService,
    ) -> DialogOutcome {
        if !self.dialog.is_open() {
            tracing::warn!("SETTINGS: Choice on row {} without an open list", self.id());
            return DialogOutcome::Ignored;
        }
        if index >= self.entries().len() || index >= self.entry_values().len() {
            tracing::warn!("SETTINGS: Choice {} out of range for row {}", index, self.id());
            return DialogOutcome::Ignored;
        }

        tracing::debug!("SETTINGS: Selected entry {} for row {}", index, self.id());
        self.set_value(index);
        self.dialog = DialogState::Resolved(Resolution::Committed);
        dialogs.dismiss(self.id());
        notify_changed(&*self, origin, callback);
        DialogOutcome::Dismissed
    }

    pub fn cancel(&mut self, dialogs: &mut dyn DialogService) -> DialogOutcome {
        if !self.dialog.is_open() {
            return DialogOutcome::Ignored;
        }
        tracing::debug!("SETTINGS: Cancelled selection for row {}", self.id());
        self.dialog = DialogState::Resolved(Resolution::Cancelled);
        dialogs.dismiss(self.id());
        DialogOutcome::Dismissed
    }

    fn open_choices(&mut self, entries: Vec<String>, dialogs: &mut dyn DialogService) {
        let resources = self.resources.as_ref();
        let current = self.value();
        let checked = (current < entries.len()).then_some(current);
        let request = DialogRequest {
            owner: self.id(),
            title: self.title().resolve(resources),
            body: DialogBody::Choices { entries, checked },
            buttons: vec![DialogButton::new(
                ButtonKind::Negative,
                string_or(resources, STR_CANCEL, "Cancel"),
                DialogAction::Cancel,
            )],
        };
        self.dialog = DialogState::Open(());
        tracing::debug!("SETTINGS: Opened choices for row {}", self.id());
        dialogs.open(request);
    }
}

impl Row for SelectorRow {
    fn base(&self) -> &RowBase {
        self.row.base()
    }

    fn base_mut(&mut self) -> &mut RowBase {
        self.row.base_mut()
    }

    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Selector
    }

    fn on_pressed(
        &mut self,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        dialogs: &mut dyn DialogService,
    ) {
        let entries = self.entries();
        if entries.is_empty() || self.entry_values().is_empty() {
            tracing::debug!("SETTINGS: Row {} has no entries, ignoring press", self.id());
            return;
        }
        callback.on_item_pressed(origin, &*self);
        self.open_choices(entries, dialogs);
    }

    /// Entries and the backing value can change underneath the row, so the
    /// derived properties are republished when the selected entry moved
    fn refresh(&mut self) {
        self.base_mut().run_refresh_hook();
        let current = self.selected_entry();
        if current == self.shown_entry {
            return;
        }
        self.shown_entry = current;
        for key in DERIVED_KEYS {
            self.base().observable().notify(key);
        }
    }

    /// Falls back to the selected entry when no description is set
    fn description(&self) -> Text {
        let description = self.base().description();
        if description.is_empty() {
            self.selected_entry().map(Text::Literal).unwrap_or_default()
        } else {
            description.clone()
        }
    }
}

impl fmt::Debug for SelectorRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorRow")
            .field("base", self.base())
            .field("value", &self.value())
            .field("entries_res", &self.entries_res)
            .field("entry_values_res", &self.entry_values_res)
            .field("dialog", &self.dialog)
            .finish()
    }
}
