//! Test helpers for row behavior.
//!
//! Recording stand-ins for the collaborators a row talks to: the list
//! controller, the modal service, the resource resolver and subscribers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{
    DialogRequest, DialogService, InteractionCallback, Origin, PropertyKey, Resources, Row,
    RowBase, RowId,
};
use crate::error::ResourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackEvent {
    Pressed,
    Changed,
}

/// Records every callback with the row it was made for
#[derive(Debug, Default)]
pub struct RecordingCallback {
    pub events: Vec<(CallbackEvent, RowId, Origin)>,
}

impl RecordingCallback {
    pub fn kinds(&self) -> Vec<CallbackEvent> {
        self.events.iter().map(|(kind, _, _)| *kind).collect()
    }

    pub fn count(&self, kind: CallbackEvent) -> usize {
        self.events.iter().filter(|(k, _, _)| *k == kind).count()
    }
}

impl InteractionCallback for RecordingCallback {
    fn on_item_pressed(&mut self, origin: &Origin, item: &dyn Row) {
        self.events.push((CallbackEvent::Pressed, item.id(), *origin));
    }

    fn on_item_changed(&mut self, origin: &Origin, item: &dyn Row) {
        self.events.push((CallbackEvent::Changed, item.id(), *origin));
    }
}

/// Records opened and dismissed dialogs
#[derive(Debug, Default)]
pub struct RecordingDialogs {
    pub opened: Vec<DialogRequest>,
    pub dismissed: Vec<RowId>,
}

impl RecordingDialogs {
    pub fn last(&self) -> Option<&DialogRequest> {
        self.opened.last()
    }
}

impl DialogService for RecordingDialogs {
    fn open(&mut self, request: DialogRequest) {
        self.opened.push(request);
    }

    fn dismiss(&mut self, owner: RowId) {
        self.dismissed.push(owner);
    }
}

/// Map-backed resources
#[derive(Debug, Default)]
pub struct MapResources {
    pub strings: HashMap<String, String>,
    pub arrays: HashMap<String, Vec<String>>,
}

impl MapResources {
    pub fn with_array(mut self, id: &str, items: &[&str]) -> Self {
        self.arrays
            .insert(id.to_string(), items.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_string(mut self, id: &str, value: &str) -> Self {
        self.strings.insert(id.to_string(), value.to_string());
        self
    }
}

impl Resources for MapResources {
    fn string(&self, id: &str) -> Option<String> {
        self.strings.get(id).cloned()
    }

    fn string_array(&self, id: &str) -> Result<Vec<String>, ResourceError> {
        self.arrays
            .get(id)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(id.to_string()))
    }
}

/// Resources with a three-level array pair and the dialog button labels
pub fn test_resources() -> Rc<dyn Resources> {
    Rc::new(
        MapResources::default()
            .with_array("levels", &["Low", "Med", "High"])
            .with_array("level_values", &["0", "1", "2"])
            .with_array("empty", &[])
            .with_string("ok", "OK")
            .with_string("cancel", "Cancel")
            .with_string("level_title", "Level"),
    )
}

/// Subscribe a recorder to a row's observable
pub fn record<R: Row + ?Sized>(row: &mut R) -> Rc<RefCell<Vec<PropertyKey>>> {
    record_base(row.base_mut())
}

pub fn record_base(base: &mut RowBase) -> Rc<RefCell<Vec<PropertyKey>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    base.observable_mut()
        .subscribe(move |key| sink.borrow_mut().push(key));
    seen
}
