//! End-to-end tests of the settings screen: render, route input, check the
//! rows, the shared config and what ends up on screen.

use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::style::Color;

use crate::config::{self, Config};
use crate::settings::{BundledResources, LayoutKind, Row};
use crate::tui::app::App;
use crate::tui::testing::*;

fn index_of(app: &App, title: &str) -> usize {
    app.items()
        .iter()
        .position(|item| item.title().resolve(&BundledResources) == title)
        .unwrap()
}

fn click_row(app: &mut App, index: usize) {
    let rect = app.row_rect(index).unwrap();
    for event in click(rect.x + 2, rect.y) {
        app.handle_mouse(event);
    }
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

fn screen_text(app: &mut App) -> Vec<String> {
    buffer_lines(&render_app(app))
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect()
}

#[test]
fn test_initial_screen() {
    let (_, mut app) = test_app();
    let lines = screen_text(&mut app);

    assert_eq!(lines[0], " Settings");
    assert!(lines[1].starts_with(" ── Updates ──"));
    assert!(lines[2].starts_with(" ► ⟳ Check for updates"));
    assert!(lines[2].ends_with("[✔]"));
    assert_eq!(lines[3], "   Look for a new release at startup");
    assert!(lines[4].ends_with("▼ Stable"));
    assert!(lines[6].ends_with("(not set)"));
    assert!(lines[RENDER_HEIGHT as usize - 1].ends_with("Enter Change  q Quit"));
}

#[test]
fn test_click_toggle_switches_to_ascii() {
    let (config, mut app) = test_app();
    render_app(&mut app);

    let row = index_of(&app, "Use Unicode");
    click_row(&mut app, row);

    assert!(!config.borrow().preferences.use_unicode);
    let lines = screen_text(&mut app);
    assert!(lines[1].starts_with(" -- Updates --"));
    assert!(lines[2].ends_with("[X]"));
}

#[test]
fn test_drag_off_toggle_cancels() {
    let (config, mut app) = test_app();
    render_app(&mut app);
    let rect = app.row_rect(index_of(&app, "Check for updates")).unwrap();

    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), rect.x + 2, rect.y));
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), rect.x + 2, rect.bottom() + 4));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), rect.x + 2, rect.bottom() + 4));

    assert!(config.borrow().preferences.check_updates);
    assert_eq!(app.controller().last_pressed(), None);
}

#[test]
fn test_rejected_time_format_keeps_editor_open() {
    let (config, mut app) = test_app();
    render_app(&mut app);

    let row = index_of(&app, "Time format");
    click_row(&mut app, row);
    assert!(app.modal().is_open());

    app.handle_key(ctrl('u'));
    type_text(&mut app, "%Q");
    app.handle_key(key(KeyCode::Enter));

    assert!(app.modal().is_open());
    assert_eq!(config.borrow().preferences.time_format, "%H:%M:%S");
    assert!(screen_text(&mut app).iter().any(|l| l.contains("Invalid value")));

    // Editing clears the hint
    app.handle_key(key(KeyCode::Backspace));
    assert!(!screen_text(&mut app).iter().any(|l| l.contains("Invalid value")));

    app.handle_key(ctrl('u'));
    type_text(&mut app, "%H:%M");
    app.handle_key(key(KeyCode::Enter));

    assert!(!app.modal().is_open());
    assert_eq!(config.borrow().preferences.time_format, "%H:%M");
    assert_eq!(
        app.controller().status().map(|s| s.text.as_str()),
        Some("Updated Time format")
    );
}

#[test]
fn test_cancel_button_discards_draft() {
    let (config, mut app) = test_app();
    render_app(&mut app);

    let row = index_of(&app, "Log file");
    click_row(&mut app, row);
    type_text(&mut app, ".bak");
    render_app(&mut app);

    let cancel = app
        .modal_layout()
        .hits
        .iter()
        .find(|(_, action)| *action == crate::settings::DialogAction::Cancel)
        .map(|(rect, _)| *rect)
        .unwrap();
    for event in click(cancel.x, cancel.y) {
        app.handle_mouse(event);
    }

    assert!(!app.modal().is_open());
    assert_eq!(config.borrow().log_file, "/dev/null");
}

#[test]
fn test_click_theme_entry_recolors_selection() {
    let (config, mut app) = test_app();
    render_app(&mut app);

    let row = index_of(&app, "Theme");
    click_row(&mut app, row);
    render_app(&mut app);
    let blue = app
        .modal_layout()
        .hits
        .iter()
        .find(|(_, action)| *action == crate::settings::DialogAction::Choose(3))
        .map(|(rect, _)| *rect)
        .unwrap();
    for event in click(blue.x + 4, blue.y) {
        app.handle_mouse(event);
    }

    assert!(!app.modal().is_open());
    assert_eq!(config.borrow().preferences.theme, 3);
    let buf = render_app(&mut app);
    assert_eq!(buf[(1, 0)].fg, Color::Blue);
}

#[test]
fn test_log_level_stores_entry_value() {
    let (config, mut app) = test_app();
    render_app(&mut app);

    let row = index_of(&app, "Log level");
    click_row(&mut app, row);
    assert_eq!(app.modal().active().unwrap().highlighted, 2);
    app.handle_key(key(KeyCode::Up));
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(config.borrow().log_level, "debug");
}

#[test]
fn test_click_disabled_row_does_nothing() {
    let (_, mut app) = test_app();
    render_app(&mut app);

    let row = index_of(&app, "Custom channel URL");
    click_row(&mut app, row);

    assert!(!app.modal().is_open());
    assert_eq!(app.controller().last_pressed(), None);
}

#[test]
fn test_custom_channel_from_config_starts_enabled() {
    let mut config = Config::default();
    config.preferences.update_channel = 2;
    let (_, mut app) = test_app_with(config);
    render_app(&mut app);

    let url = index_of(&app, "Custom channel URL");
    assert!(app.items()[url].is_enabled());

    click_row(&mut app, url);
    type_text(&mut app, "example.com/feed");
    app.handle_key(key(KeyCode::Enter));
    assert!(app.modal().is_open());

    app.handle_key(ctrl('u'));
    type_text(&mut app, "https://example.com/feed");
    app.handle_key(key(KeyCode::Enter));
    assert!(!app.modal().is_open());
}

#[test]
fn test_two_column_navigation() {
    let mut config = Config::default();
    config.columns = 2;
    let (_, mut app) = test_app_with(config);
    render_app(&mut app);

    let check = index_of(&app, "Check for updates");
    let channel = index_of(&app, "Update channel");
    assert_eq!(app.row_rect(check).unwrap().y, app.row_rect(channel).unwrap().y);
    assert!(app.row_rect(channel).unwrap().x > 0);
    assert_eq!(app.row_rect(0).unwrap().width, RENDER_WIDTH);

    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.selected(), channel);
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.selected(), index_of(&app, "Custom channel URL"));
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.selected(), index_of(&app, "Theme"));
    app.handle_key(key(KeyCode::Right));
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.selected(), index_of(&app, "Time format"));
}

#[test]
fn test_blank_click_reports_without_saving() {
    let (_, mut app) = test_app();
    render_app(&mut app);
    let blank = app
        .items()
        .iter()
        .position(|item| item.layout_kind() == LayoutKind::Blank)
        .unwrap();

    let rect = app.row_rect(blank).unwrap();
    for event in click(rect.x + 2, rect.y) {
        app.handle_mouse(event);
    }

    assert_eq!(app.controller().last_pressed(), Some(app.items()[blank].id()));
    assert_eq!(app.controller().status(), None);
}

#[test]
fn test_changes_persist_to_config_file() {
    let path = std::env::temp_dir()
        .join(format!("settings-rows-screen-{}", std::process::id()))
        .join("config.toml");
    let shared = std::rc::Rc::new(std::cell::RefCell::new(Config::default()));
    let mut app = App::new(
        std::rc::Rc::clone(&shared),
        std::rc::Rc::new(BundledResources),
        Some(path.clone()),
    );
    render_app(&mut app);

    let row = index_of(&app, "Check for updates");
    click_row(&mut app, row);

    assert!(!config::read_from(&path).preferences.check_updates);
    assert_eq!(
        app.controller().status().map(|s| s.text.as_str()),
        Some("Saved Check for updates")
    );
    let _ = std::fs::remove_file(&path);
}
