use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

use crate::error::{ConfigError, ConfigResult};

/// Selection color used when the theme is "none" or unknown
pub const DEFAULT_SELECTION_FG: Color = Color::Rgb(255, 165, 0);

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Grid columns on the settings screen
    pub columns: u16,
    /// Overrides the theme's selection color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection_fg: Option<String>,
    pub preferences: Preferences,
}

/// Values edited through the settings screen
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub check_updates: bool,
    pub update_channel: usize,
    pub custom_channel_url: String,
    pub theme: usize,
    pub use_unicode: bool,
    pub time_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            columns: 1,
            selection_fg: None,
            preferences: Preferences::default(),
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            check_updates: true,
            update_channel: 0,
            custom_channel_url: String::new(),
            theme: 1,
            use_unicode: true,
            time_format: "%H:%M:%S".to_string(),
        }
    }
}

/// Resolved display settings handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub use_unicode: bool,
    pub selection_fg: Color,
    pub error_fg: Color,
}

impl Config {
    pub fn display(&self, theme_value: Option<&str>) -> DisplayConfig {
        DisplayConfig {
            use_unicode: self.preferences.use_unicode,
            selection_fg: self.selection_fg(theme_value),
            error_fg: Color::Red,
        }
    }

    /// Selection color: explicit override, else the theme's stored value
    pub fn selection_fg(&self, theme_value: Option<&str>) -> Color {
        self.selection_fg
            .as_deref()
            .and_then(parse_color)
            .or_else(|| theme_value.and_then(parse_color))
            .unwrap_or(DEFAULT_SELECTION_FG)
    }
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    // Named colors
    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "gray" | "grey" => return Some(Color::Gray),
        "white" => return Some(Color::White),
        "orange" => return Some(Color::Rgb(255, 165, 0)),
        "purple" => return Some(Color::Rgb(160, 32, 240)),
        _ => {}
    }

    // Hex colors (#FF6600 or #f60)
    if let Some(hex) = s.strip_prefix('#') {
        // Byte offsets below are only char boundaries for ASCII
        if !hex.is_ascii() {
            return None;
        }
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    // RGB tuples "255,165,0"
    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() == 3 {
            let r = parts[0].trim().parse::<u8>().ok()?;
            let g = parts[1].trim().parse::<u8>().ok()?;
            let b = parts[2].trim().parse::<u8>().ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

/// Read the config file, falling back to defaults on any problem
pub fn read() -> Config {
    match get_config_path() {
        Some(path) => read_from(&path),
        None => Config::default(),
    }
}

pub fn read_from(path: &Path) -> Config {
    // Check if file exists
    if !path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("CONFIG: Failed to read {}: {}", path.display(), e);
            return Config::default();
        }
    };

    toml::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("CONFIG: Invalid config {}: {}", path.display(), e);
        Config::default()
    })
}

/// Write the config file, returning the path written
pub fn write(config: &Config) -> ConfigResult<PathBuf> {
    let path = get_config_path().ok_or(ConfigError::NoConfigPath)?;
    write_to(config, &path)?;
    Ok(path)
}

pub fn write_to(config: &Config, path: &Path) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
