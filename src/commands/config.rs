use std::path::Path;

use anyhow::Result;

use crate::config::{self, Config};

pub fn format_config(cfg: &Config, path: Option<&Path>) -> String {
    let mut output = String::new();

    let (path_str, exists) = match path {
        Some(path) => (path.display().to_string(), path.exists()),
        None => ("Unable to determine config path".to_string(), false),
    };

    output.push_str(&format!(
        "Configuration File: {} (Exists: {})\n\n",
        path_str,
        if exists { "yes" } else { "no" }
    ));
    output.push_str("Current Configuration:\n");
    output.push_str("=====================\n");
    output.push_str(&format!("log_level: {}\n", cfg.log_level));
    output.push_str(&format!("log_file: {}\n", cfg.log_file));
    output.push_str(&format!("columns: {}\n", cfg.columns));
    output.push_str(&format!(
        "selection_fg: {}\n",
        cfg.selection_fg.as_deref().unwrap_or("(from theme)")
    ));
    output.push_str("\n[preferences]\n");
    let prefs = &cfg.preferences;
    output.push_str(&format!("check_updates: {}\n", prefs.check_updates));
    output.push_str(&format!("update_channel: {}\n", prefs.update_channel));
    output.push_str(&format!("custom_channel_url: {}\n", prefs.custom_channel_url));
    output.push_str(&format!("theme: {}\n", prefs.theme));
    output.push_str(&format!("use_unicode: {}\n", prefs.use_unicode));
    output.push_str(&format!("time_format: {}\n", prefs.time_format));
    output
}

pub fn run(cfg: &Config) -> Result<()> {
    let path = config::get_config_path();
    print!("{}", format_config(cfg, path.as_deref()));
    Ok(())
}
