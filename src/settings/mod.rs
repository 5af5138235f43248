//! Settings rows - observable view-models for the entries of a settings list
//!
//! Every row shares a [`RowBase`] (identity, icon, title, description,
//! enabled flag and property-change channel) and implements [`Row`]. The
//! closed set of row kinds is [`SettingsItem`]; renderers switch on
//! [`LayoutKind`] to pick a template.

pub mod blank;
pub mod dialog;
pub mod input;
pub mod observable;
pub mod resources;
pub mod selector;
pub mod toggle;
pub mod value;

#[cfg(test)]
pub mod testing;

pub use blank::{BlankRow, SectionRow};
pub use dialog::{
    ButtonKind, DialogAction, DialogBody, DialogButton, DialogOutcome, DialogRequest,
    DialogService, DialogState, Resolution,
};
pub use input::{EditSession, InputRow};
pub use observable::{set_observed, Observable, PropertyKey, SubscriptionId};
pub use resources::{BundledResources, Resources, Text};
pub use selector::SelectorRow;
pub use toggle::{ToggleRow, TouchPhase};
pub use value::{set_value, MemorySource, ValueRow, ValueSource};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ROW_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a row instance
///
/// Allocated once per constructed row. Rows are not `Clone`, so two rows
/// with the same id are the same instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    fn next() -> Self {
        RowId(NEXT_ROW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Widget template a row renders with; fixed per row kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Toggle,
    Input,
    Selector,
    Blank,
    Section,
}

/// Where an interaction happened: the row's list position and screen anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Origin {
    pub index: usize,
    pub x: u16,
    pub y: u16,
}

impl Origin {
    pub fn new(index: usize, x: u16, y: u16) -> Self {
        Self { index, x, y }
    }
}

/// Implemented by the list controller that owns the rows
pub trait InteractionCallback {
    /// Called first by every press, before the row acts
    fn on_item_pressed(&mut self, origin: &Origin, item: &dyn Row);

    /// Called last, once the row's interaction succeeded
    fn on_item_changed(&mut self, origin: &Origin, item: &dyn Row);
}

type RefreshHook = Box<dyn FnMut(&mut RowBase)>;

/// State shared by every row kind
pub struct RowBase {
    id: RowId,
    icon: Option<&'static str>,
    title: Text,
    description: Text,
    enabled: bool,
    observable: Observable,
    refresh_hook: Option<RefreshHook>,
}

impl RowBase {
    pub fn new(title: Text) -> Self {
        Self {
            id: RowId::next(),
            icon: None,
            title,
            description: Text::Empty,
            enabled: true,
            observable: Observable::new(),
            refresh_hook: None,
        }
    }

    pub fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_description(mut self, description: Text) -> Self {
        self.description = description;
        self
    }

    /// Initial enabled state; does not publish
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Hook run by [`Row::refresh`] to recompute derived state such as `enabled`
    pub fn with_refresh(mut self, hook: impl FnMut(&mut RowBase) + 'static) -> Self {
        self.refresh_hook = Some(Box::new(hook));
        self
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn icon(&self) -> Option<&'static str> {
        self.icon
    }

    pub fn title(&self) -> &Text {
        &self.title
    }

    pub fn description(&self) -> &Text {
        &self.description
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Publishes [`PropertyKey::Enabled`] when the flag actually changes
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let old = self.enabled;
        set_observed(
            &self.observable,
            enabled,
            &old,
            |v| self.enabled = *v,
            &[PropertyKey::Enabled],
            |_| {},
        )
    }

    pub fn observable(&self) -> &Observable {
        &self.observable
    }

    pub fn observable_mut(&mut self) -> &mut Observable {
        &mut self.observable
    }

    fn run_refresh_hook(&mut self) {
        if let Some(mut hook) = self.refresh_hook.take() {
            hook(self);
            self.refresh_hook = Some(hook);
        }
    }
}

impl fmt::Debug for RowBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowBase")
            .field("id", &self.id)
            .field("icon", &self.icon)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Interface every row kind exposes to controllers and renderers
pub trait Row {
    fn base(&self) -> &RowBase;

    fn base_mut(&mut self) -> &mut RowBase;

    fn layout_kind(&self) -> LayoutKind;

    /// Whether the row spans every column of a grid layout
    fn is_full_span(&self) -> bool {
        false
    }

    /// Handle a press. Callers only dispatch presses to enabled rows.
    fn on_pressed(
        &mut self,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        dialogs: &mut dyn DialogService,
    );

    /// Recompute derived display state
    fn refresh(&mut self) {
        self.base_mut().run_refresh_hook();
    }

    fn id(&self) -> RowId {
        self.base().id()
    }

    fn title(&self) -> &Text {
        self.base().title()
    }

    fn description(&self) -> Text {
        self.base().description().clone()
    }

    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    fn same_item(&self, other: &dyn Row) -> bool {
        self.id() == other.id()
    }

    /// Rows have no content equality beyond identity; content changes are
    /// published through the observable instead.
    fn same_content(&self, other: &dyn Row) -> bool {
        self.same_item(other)
    }
}

/// The press behavior every row ends with
pub(crate) fn notify_changed(row: &dyn Row, origin: &Origin, callback: &mut dyn InteractionCallback) {
    callback.on_item_changed(origin, row);
}

/// The closed set of row kinds
#[derive(Debug)]
pub enum SettingsItem {
    Toggle(ToggleRow),
    Input(InputRow),
    Selector(SelectorRow),
    Blank(BlankRow),
    Section(SectionRow),
}

impl SettingsItem {
    fn as_row(&self) -> &dyn Row {
        match self {
            SettingsItem::Toggle(row) => row,
            SettingsItem::Input(row) => row,
            SettingsItem::Selector(row) => row,
            SettingsItem::Blank(row) => row,
            SettingsItem::Section(row) => row,
        }
    }

    fn as_row_mut(&mut self) -> &mut dyn Row {
        match self {
            SettingsItem::Toggle(row) => row,
            SettingsItem::Input(row) => row,
            SettingsItem::Selector(row) => row,
            SettingsItem::Blank(row) => row,
            SettingsItem::Section(row) => row,
        }
    }

    /// Route a touch phase to the row
    ///
    /// Returns true if the row consumed it. Only toggles own touch handling;
    /// for other rows the caller falls back to dispatching a press.
    pub fn on_touched(
        &mut self,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        phase: TouchPhase,
    ) -> bool {
        match self {
            SettingsItem::Toggle(row) => row.on_touched(origin, callback, phase),
            _ => false,
        }
    }

    /// Route a dialog action to the row that owns the dialog
    pub fn on_dialog_action(
        &mut self,
        action: DialogAction,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        dialogs: &mut dyn DialogService,
    ) -> DialogOutcome {
        match (self, action) {
            (SettingsItem::Input(row), DialogAction::Confirm) => row.confirm(origin, callback, dialogs),
            (SettingsItem::Input(row), DialogAction::Cancel) => row.cancel(dialogs),
            (SettingsItem::Selector(row), DialogAction::Choose(index)) => {
                row.choose(index, origin, callback, dialogs)
            }
            (SettingsItem::Selector(row), DialogAction::Cancel) => row.cancel(dialogs),
            (item, action) => {
                tracing::warn!("SETTINGS: {:?} does not apply to row {}", action, item.id());
                DialogOutcome::Ignored
            }
        }
    }

    /// Current value rendered as text, for rows that carry one
    pub fn display_value(&self) -> Option<String> {
        match self {
            SettingsItem::Toggle(row) => Some(if row.value() { "on" } else { "off" }.to_string()),
            SettingsItem::Input(row) => Some(row.value()),
            SettingsItem::Selector(row) => Some(row.selected_entry().unwrap_or_default()),
            SettingsItem::Blank(_) | SettingsItem::Section(_) => None,
        }
    }

    pub fn as_input(&self) -> Option<&InputRow> {
        match self {
            SettingsItem::Input(row) => Some(row),
            _ => None,
        }
    }

    pub fn as_input_mut(&mut self) -> Option<&mut InputRow> {
        match self {
            SettingsItem::Input(row) => Some(row),
            _ => None,
        }
    }

    pub fn as_selector(&self) -> Option<&SelectorRow> {
        match self {
            SettingsItem::Selector(row) => Some(row),
            _ => None,
        }
    }

    pub fn as_toggle(&self) -> Option<&ToggleRow> {
        match self {
            SettingsItem::Toggle(row) => Some(row),
            _ => None,
        }
    }
}

impl Row for SettingsItem {
    fn base(&self) -> &RowBase {
        self.as_row().base()
    }

    fn base_mut(&mut self) -> &mut RowBase {
        self.as_row_mut().base_mut()
    }

    fn layout_kind(&self) -> LayoutKind {
        self.as_row().layout_kind()
    }

    fn is_full_span(&self) -> bool {
        self.as_row().is_full_span()
    }

    fn on_pressed(
        &mut self,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        dialogs: &mut dyn DialogService,
    ) {
        self.as_row_mut().on_pressed(origin, callback, dialogs);
    }

    fn refresh(&mut self) {
        self.as_row_mut().refresh();
    }

    fn description(&self) -> Text {
        self.as_row().description()
    }
}

impl From<ToggleRow> for SettingsItem {
    fn from(row: ToggleRow) -> Self {
        SettingsItem::Toggle(row)
    }
}

impl From<InputRow> for SettingsItem {
    fn from(row: InputRow) -> Self {
        SettingsItem::Input(row)
    }
}

impl From<SelectorRow> for SettingsItem {
    fn from(row: SelectorRow) -> Self {
        SettingsItem::Selector(row)
    }
}

impl From<BlankRow> for SettingsItem {
    fn from(row: BlankRow) -> Self {
        SettingsItem::Blank(row)
    }
}

impl From<SectionRow> for SettingsItem {
    fn from(row: SectionRow) -> Self {
        SettingsItem::Section(row)
    }
}
