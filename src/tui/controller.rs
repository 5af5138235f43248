/// List controller - receives row interactions and persists the config
///
/// Rows write through to the shared config as soon as they change; the
/// controller saves it, reports the outcome in the status line, and asks
/// the app to refresh derived row state.

use std::path::PathBuf;
use std::rc::Rc;

use crate::config;
use crate::screen::SharedConfig;
use crate::settings::{InteractionCallback, LayoutKind, Origin, Resources, Row, RowId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

pub struct ListController {
    config: SharedConfig,
    resources: Rc<dyn Resources>,
    /// Where to save; `None` keeps changes in memory
    config_path: Option<PathBuf>,
    status: Option<Status>,
    pending_refresh: bool,
    last_pressed: Option<RowId>,
}

impl ListController {
    pub fn new(config: SharedConfig, resources: Rc<dyn Resources>, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            resources,
            config_path,
            status: None,
            pending_refresh: false,
            last_pressed: None,
        }
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn last_pressed(&self) -> Option<RowId> {
        self.last_pressed
    }

    /// Whether a change happened since the last call
    pub fn take_pending_refresh(&mut self) -> bool {
        std::mem::take(&mut self.pending_refresh)
    }

    fn save(&mut self, title: &str) {
        let Some(path) = &self.config_path else {
            self.status = Some(Status {
                text: format!("Updated {}", title),
                is_error: false,
            });
            return;
        };

        match config::write_to(&self.config.borrow(), path) {
            Ok(()) => {
                tracing::info!("CONFIG: Saved {} to {}", title, path.display());
                self.status = Some(Status {
                    text: format!("Saved {}", title),
                    is_error: false,
                });
            }
            Err(e) => {
                tracing::error!("CONFIG: Failed to save: {}", e);
                self.status = Some(Status {
                    text: format!("Could not save settings: {}", e),
                    is_error: true,
                });
            }
        }
    }
}

impl InteractionCallback for ListController {
    fn on_item_pressed(&mut self, origin: &Origin, item: &dyn Row) {
        tracing::debug!("SCREEN: Pressed row {} at index {}", item.id(), origin.index);
        self.status = None;
        self.last_pressed = Some(item.id());
    }

    fn on_item_changed(&mut self, origin: &Origin, item: &dyn Row) {
        tracing::debug!("SCREEN: Row {} at index {} changed", item.id(), origin.index);
        self.pending_refresh = true;
        if matches!(item.layout_kind(), LayoutKind::Blank | LayoutKind::Section) {
            return;
        }
        let title = item.title().resolve(&*self.resources);
        self.save(&title);
    }
}
