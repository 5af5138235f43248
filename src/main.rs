use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use settings_rows::settings::BundledResources;
use settings_rows::{commands, config, tui};

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "settings-rows")]
#[command(about = "Terminal settings screen", long_about = "Terminal settings screen\n\nIf no command is specified, the program starts in interactive mode.")]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display current configuration
    Config,
    /// List the settings rows with their current values
    Rows,
}

fn parse_level(log_level: &str) -> Level {
    match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// `RUST_LOG` wins when set, otherwise the resolved level applies to everything
fn log_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(parse_level(log_level).into()))
}

fn init_logging(log_level: &str, log_file: &str) {
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(log_level))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

fn run_tui_mode(config: config::Config) -> anyhow::Result<()> {
    let path = config::get_config_path();
    if path.is_none() {
        tracing::warn!("CONFIG: No config path; changes will not be saved");
    }
    let shared = Rc::new(RefCell::new(config));
    tui::run(shared, Rc::new(BundledResources), path).context("Failed to run the settings screen")
}

fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    let result = match cli.command {
        None => run_tui_mode(config),
        Some(Commands::Config) => commands::config::run(&config),
        Some(Commands::Rows) => commands::rows::run(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_log_filter_uses_resolved_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = log_filter("trace");
        assert_eq!(filter.max_level_hint(), Some(tracing::level_filters::LevelFilter::TRACE));
    }

    #[test]
    fn test_resolve_log_config_prefers_cli() {
        let mut config = config::Config::default();
        config.log_level = "debug".to_string();
        config.log_file = "/tmp/settings.log".to_string();

        let cli = Cli::parse_from(["settings-rows"]);
        assert_eq!(resolve_log_config(&cli, &config), ("debug", "/tmp/settings.log"));

        let cli = Cli::parse_from(["settings-rows", "-L", "error", "-F", "/tmp/other.log"]);
        assert_eq!(resolve_log_config(&cli, &config), ("error", "/tmp/other.log"));
    }
}
