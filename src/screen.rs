/// Settings screen assembly
///
/// Builds the concrete rows of the settings screen and binds each value row
/// to one field of the shared [`Config`]. Rows read and write the config
/// directly; persisting it to disk is the list controller's job.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::format::{Item, StrftimeItems};

use crate::config::Config;
use crate::settings::{
    BlankRow, InputRow, LayoutKind, Resources, Row, RowBase, SectionRow, SelectorRow,
    SettingsItem, Text, ToggleRow, ValueSource,
};

pub type SharedConfig = Rc<RefCell<Config>>;

/// Index of the "Custom" update channel
pub const CUSTOM_CHANNEL: usize = 2;

/// Value source bound to one config field
pub struct ConfigField<T> {
    config: SharedConfig,
    get: fn(&Config) -> T,
    set: fn(&mut Config, T),
}

impl<T> ConfigField<T> {
    pub fn new(config: &SharedConfig, get: fn(&Config) -> T, set: fn(&mut Config, T)) -> Self {
        Self {
            config: Rc::clone(config),
            get,
            set,
        }
    }
}

impl<T> ValueSource<T> for ConfigField<T> {
    fn get(&self) -> T {
        (self.get)(&self.config.borrow())
    }

    fn set(&mut self, value: T) {
        (self.set)(&mut self.config.borrow_mut(), value);
    }
}

/// Selector source storing the entry value rather than the index
///
/// Unknown stored values read as an index past the end, so the row shows no
/// selection and choosing any entry is a real change.
pub struct IndexedField {
    config: SharedConfig,
    values: Vec<String>,
    get: fn(&Config) -> &str,
    set: fn(&mut Config, String),
}

impl IndexedField {
    pub fn new(
        config: &SharedConfig,
        values: Vec<String>,
        get: fn(&Config) -> &str,
        set: fn(&mut Config, String),
    ) -> Self {
        Self {
            config: Rc::clone(config),
            values,
            get,
            set,
        }
    }
}

impl ValueSource<usize> for IndexedField {
    fn get(&self) -> usize {
        let config = self.config.borrow();
        let stored = (self.get)(&config);
        self.values
            .iter()
            .position(|v| v == stored)
            .unwrap_or(self.values.len())
    }

    fn set(&mut self, index: usize) {
        match self.values.get(index) {
            Some(value) => (self.set)(&mut self.config.borrow_mut(), value.clone()),
            None => tracing::warn!("SCREEN: No entry value at index {}", index),
        }
    }
}

/// Accepts `http://` or `https://` URLs with a host
pub fn validate_channel_url(draft: &str) -> Option<String> {
    let url = draft.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() || url.chars().any(char::is_whitespace) {
        return None;
    }
    Some(url.to_string())
}

/// Accepts non-empty strftime patterns chrono can parse
pub fn validate_time_format(draft: &str) -> Option<String> {
    if draft.trim().is_empty() {
        return None;
    }
    let invalid = StrftimeItems::new(draft).any(|item| matches!(item, Item::Error));
    (!invalid).then(|| draft.to_string())
}

pub fn validate_non_blank(draft: &str) -> Option<String> {
    let trimmed = draft.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Build every row of the settings screen, in display order
pub fn build_rows(config: &SharedConfig, resources: Rc<dyn Resources>) -> Vec<SettingsItem> {
    let channel_config = Rc::clone(config);
    let custom_enabled = config.borrow().preferences.update_channel == CUSTOM_CHANNEL;
    let log_levels = resources
        .string_array("log_level_values")
        .unwrap_or_default();

    vec![
        // Updates
        SectionRow::new(RowBase::new(Text::res("section_updates"))).into(),
        ToggleRow::new(
            RowBase::new(Text::res("check_updates"))
                .with_icon("update")
                .with_description(Text::res("check_updates_summary")),
            ConfigField::new(
                config,
                |c| c.preferences.check_updates,
                |c, v| c.preferences.check_updates = v,
            ),
        )
        .into(),
        SelectorRow::new(
            RowBase::new(Text::res("update_channel")).with_icon("channel"),
            ConfigField::new(
                config,
                |c| c.preferences.update_channel,
                |c, v| c.preferences.update_channel = v,
            ),
            Rc::clone(&resources),
        )
        .with_entries("update_channels", "update_channel_values")
        .into(),
        InputRow::new(
            RowBase::new(Text::res("custom_channel_url"))
                .with_icon("link")
                .with_enabled(custom_enabled)
                .with_refresh(move |base| {
                    let custom =
                        channel_config.borrow().preferences.update_channel == CUSTOM_CHANNEL;
                    base.set_enabled(custom);
                }),
            ConfigField::new(
                config,
                |c| c.preferences.custom_channel_url.clone(),
                |c, v| c.preferences.custom_channel_url = v,
            ),
            Rc::clone(&resources),
        )
        .with_validator(validate_channel_url)
        .with_show_strip(false)
        .into(),
        BlankRow::new(RowBase::new(Text::Empty)).into(),
        // Display
        SectionRow::new(RowBase::new(Text::res("section_display"))).into(),
        SelectorRow::new(
            RowBase::new(Text::res("theme")).with_icon("theme"),
            ConfigField::new(config, |c| c.preferences.theme, |c, v| c.preferences.theme = v),
            Rc::clone(&resources),
        )
        .with_entries("themes", "theme_values")
        .into(),
        ToggleRow::new(
            RowBase::new(Text::res("use_unicode"))
                .with_icon("unicode")
                .with_description(Text::res("use_unicode_summary")),
            ConfigField::new(
                config,
                |c| c.preferences.use_unicode,
                |c, v| c.preferences.use_unicode = v,
            ),
        )
        .into(),
        InputRow::new(
            RowBase::new(Text::res("time_format")).with_icon("clock"),
            ConfigField::new(
                config,
                |c| c.preferences.time_format.clone(),
                |c, v| c.preferences.time_format = v,
            ),
            Rc::clone(&resources),
        )
        .with_validator(validate_time_format)
        .into(),
        BlankRow::new(RowBase::new(Text::Empty)).into(),
        // Logging
        SectionRow::new(RowBase::new(Text::res("section_logging"))).into(),
        SelectorRow::new(
            RowBase::new(Text::res("log_level"))
                .with_icon("log")
                .with_description(Text::literal("Takes effect on restart")),
            IndexedField::new(config, log_levels, |c| c.log_level.as_str(), |c, v| c.log_level = v),
            Rc::clone(&resources),
        )
        .with_entries("log_levels", "log_level_values")
        .into(),
        InputRow::new(
            RowBase::new(Text::res("log_file")).with_icon("file"),
            ConfigField::new(config, |c| c.log_file.clone(), |c, v| c.log_file = v),
            resources,
        )
        .with_validator(validate_non_blank)
        .into(),
    ]
}

/// Stored value of the selected theme, e.g. "orange"
pub fn theme_value(config: &Config, resources: &dyn Resources) -> Option<String> {
    resources
        .string_array("theme_values")
        .ok()
        .and_then(|values| values.get(config.preferences.theme).cloned())
}

/// One-line plain-text description of a row
pub fn row_summary(item: &SettingsItem, resources: &dyn Resources) -> String {
    let kind = match item.layout_kind() {
        LayoutKind::Toggle => "toggle",
        LayoutKind::Input => "input",
        LayoutKind::Selector => "selector",
        LayoutKind::Blank => "blank",
        LayoutKind::Section => "section",
    };
    let title = item.title().resolve(resources);
    let mut line = format!("{:<9} {}", kind, title);
    if let Some(value) = item.display_value() {
        line = format!("{:<40} {}", line, value);
    }
    if !item.is_enabled() {
        line.push_str(" (disabled)");
    }
    line.trim_end().to_string()
}
