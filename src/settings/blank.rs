/// BlankRow and SectionRow - rows without a value

use super::{
    notify_changed, DialogService, InteractionCallback, LayoutKind, Origin, Row, RowBase,
};

/// Spacer or clickable divider
#[derive(Debug)]
pub struct BlankRow {
    base: RowBase,
}

impl BlankRow {
    pub fn new(base: RowBase) -> Self {
        Self { base }
    }
}

impl Row for BlankRow {
    fn base(&self) -> &RowBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RowBase {
        &mut self.base
    }

    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Blank
    }

    fn on_pressed(
        &mut self,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        _dialogs: &mut dyn DialogService,
    ) {
        callback.on_item_pressed(origin, &*self);
        notify_changed(&*self, origin, callback);
    }
}

/// Full-span section header
#[derive(Debug)]
pub struct SectionRow {
    base: RowBase,
}

impl SectionRow {
    pub fn new(base: RowBase) -> Self {
        Self { base }
    }
}

impl Row for SectionRow {
    fn base(&self) -> &RowBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RowBase {
        &mut self.base
    }

    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Section
    }

    fn is_full_span(&self) -> bool {
        true
    }

    // Headers add nothing to the base press
    fn on_pressed(
        &mut self,
        origin: &Origin,
        callback: &mut dyn InteractionCallback,
        _dialogs: &mut dyn DialogService,
    ) {
        notify_changed(&*self, origin, callback);
    }
}
