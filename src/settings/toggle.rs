/// ToggleRow - boolean row flipped directly by a press
///
/// No dialog is involved. Touch handling is owned by the row: only the
/// release of a touch turns into a press, every other phase is swallowed so
/// the default click path never fires a second time.

use std::fmt;

use super::value::{ValueRow, ValueSource};
use super::{
    notify_changed, DialogService, InteractionCallback, LayoutKind, Origin, Row, RowBase,
};

/// Phase of a pointer interaction on a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

pub struct ToggleRow {
    row: ValueRow<bool>,
}

impl ToggleRow {
    pub fn new(base: RowBase, source: impl ValueSource<bool> + 'static) -> Self {
        Self {
            row: ValueRow::new(base, source),
        }
    }

    pub fn with_after_changed(mut self, hook: impl FnMut(&bool) + 'static) -> Self {
        self.row = self.row.with_after_changed(hook);
        self
    }

    pub fn value(&self) -> bool {
        self.row.value()
    }

    pub fn set_value(&mut self, value: bool) -> bool {
        self.row.set_value(value)
    }

    /// Flip the value and report the change
    pub fn press(&mut self, origin: &Origin, callback: &mut dyn InteractionCallback) {
        callback.on_item_pressed(origin, &*self);
        let flipped = !self.value();
        self.row.set_value(flipped);
        tracing::debug!("SETTINGS: Toggled row {} to {}", self.id(), flipped);
        notify_changed(&*self, origin, callback);
    }

    /// Returns true for every phase; only [`TouchPhase::Up`] presses
    pub fn on_touched(
        &mut self,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        phase: TouchPhase,
    ) -> bool {
        if phase == TouchPhase::Up {
            self.press(origin, callback);
        }
        true
    }
}

impl Row for ToggleRow {
    fn base(&self) -> &RowBase {
        self.row.base()
    }

    fn base_mut(&mut self) -> &mut RowBase {
        self.row.base_mut()
    }

    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Toggle
    }

    fn on_pressed(
        &mut self,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        _dialogs: &mut dyn DialogService,
    ) {
        self.press(origin, callback);
    }
}

impl fmt::Debug for ToggleRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleRow")
            .field("base", self.base())
            .field("value", &self.value())
            .finish()
    }
}
