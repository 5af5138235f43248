pub mod commands;
pub mod config;
pub mod error;
pub mod screen;
pub mod settings;
pub mod tui;
