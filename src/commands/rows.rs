use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use crate::config::Config;
use crate::screen::{build_rows, row_summary, SharedConfig};
use crate::settings::{BundledResources, Resources, SettingsItem};

pub fn format_rows(rows: &[SettingsItem], resources: &dyn Resources) -> String {
    let mut output = String::new();
    output.push_str("\nSettings\n");
    output.push_str(&format!("{}\n", "═".repeat(60)));
    for row in rows {
        output.push_str(&row_summary(row, resources));
        output.push('\n');
    }
    output
}

pub fn run(cfg: Config) -> Result<()> {
    let shared: SharedConfig = Rc::new(RefCell::new(cfg));
    let resources: Rc<dyn Resources> = Rc::new(BundledResources);
    let rows = build_rows(&shared, Rc::clone(&resources));

    print!("{}", format_rows(&rows, &*resources));
    Ok(())
}
