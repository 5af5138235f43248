/// Text and string-array resolution for rows
///
/// Rows receive a `Resources` implementation at construction instead of
/// looking one up globally. Every lookup a row performs fails closed.

use phf::phf_map;

use crate::error::ResourceError;

/// Resolves display strings and string arrays by id
pub trait Resources {
    /// Look up a single string
    fn string(&self, id: &str) -> Option<String>;

    /// Look up an ordered string array
    fn string_array(&self, id: &str) -> Result<Vec<String>, ResourceError>;
}

/// Lazily resolved display text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Text {
    #[default]
    Empty,
    Literal(String),
    Res(&'static str),
}

impl Text {
    pub fn literal(text: impl Into<String>) -> Self {
        Text::Literal(text.into())
    }

    pub fn res(id: &'static str) -> Self {
        Text::Res(id)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Text::Empty => true,
            Text::Literal(s) => s.is_empty(),
            Text::Res(_) => false,
        }
    }

    /// Resolve against `resources`; an unknown id resolves to the id itself
    pub fn resolve(&self, resources: &dyn Resources) -> String {
        match self {
            Text::Empty => String::new(),
            Text::Literal(s) => s.clone(),
            Text::Res(id) => resources.string(id).unwrap_or_else(|| {
                tracing::warn!("RESOURCES: Missing string {}", id);
                id.to_string()
            }),
        }
    }
}

/// Resolve an optional array id, yielding an empty array on any failure
pub fn string_array_or_empty(resources: &dyn Resources, id: Option<&str>) -> Vec<String> {
    let result = match id {
        Some(id) => resources.string_array(id),
        None => Err(ResourceError::Unset),
    };
    result.unwrap_or_else(|e| {
        if e != ResourceError::Unset {
            tracing::warn!("RESOURCES: {}, using empty array", e);
        }
        Vec::new()
    })
}

/// Resolve a string id, falling back to `fallback`
pub fn string_or(resources: &dyn Resources, id: &str, fallback: &str) -> String {
    resources.string(id).unwrap_or_else(|| fallback.to_string())
}

// String ids used by the rows themselves
pub const STR_OK: &str = "ok";
pub const STR_CANCEL: &str = "cancel";

const UPDATE_CHANNELS: &[&str] = &["Stable", "Beta", "Custom"];
const UPDATE_CHANNEL_VALUES: &[&str] = &["0", "1", "2"];
const THEMES: &[&str] = &["None", "Orange", "Green", "Blue", "Purple"];
const THEME_VALUES: &[&str] = &["none", "orange", "green", "blue", "purple"];
const LOG_LEVELS: &[&str] = &["Trace", "Debug", "Info", "Warn", "Error"];
const LOG_LEVEL_VALUES: &[&str] = &["trace", "debug", "info", "warn", "error"];

static STRINGS: phf::Map<&'static str, &'static str> = phf_map! {
    "ok" => "OK",
    "cancel" => "Cancel",
    "section_updates" => "Updates",
    "section_display" => "Display",
    "section_logging" => "Logging",
    "check_updates" => "Check for updates",
    "check_updates_summary" => "Look for a new release at startup",
    "update_channel" => "Update channel",
    "custom_channel_url" => "Custom channel URL",
    "theme" => "Theme",
    "use_unicode" => "Use Unicode",
    "use_unicode_summary" => "Draw checkboxes and borders with Unicode glyphs",
    "time_format" => "Time format",
    "log_level" => "Log level",
    "log_file" => "Log file",
};

static ARRAYS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "update_channels" => UPDATE_CHANNELS,
    "update_channel_values" => UPDATE_CHANNEL_VALUES,
    "themes" => THEMES,
    "theme_values" => THEME_VALUES,
    "log_levels" => LOG_LEVELS,
    "log_level_values" => LOG_LEVEL_VALUES,
};

/// Resources compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledResources;

impl Resources for BundledResources {
    fn string(&self, id: &str) -> Option<String> {
        STRINGS.get(id).map(|s| s.to_string())
    }

    fn string_array(&self, id: &str) -> Result<Vec<String>, ResourceError> {
        ARRAYS
            .get(id)
            .map(|items| items.iter().map(|s| s.to_string()).collect())
            .ok_or_else(|| ResourceError::NotFound(id.to_string()))
    }
}
