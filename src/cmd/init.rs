//! Init command implementation
//!
//! Handles the `idf-size-delta init` command which writes a starter
//! `.idf-size-delta.toml` in the current directory.

use anyhow::Result;
use console::style;
use std::env;
use std::path::{Path, PathBuf};

use crate::config::{CollectSettings, ConfigFile, ConfigLoader, ReportSettings, CONFIG_FILE_NAME};
use crate::fmt::{icon, CHECKMARK, WARNING};
use crate::report::DEFAULT_PRECISION;

/// Create a configuration file with the default settings spelled out
///
/// An existing file is left untouched.
///
/// # Examples
///
/// ```no_run
/// use idf_size_delta::cmd::init::cmd_init;
///
/// cmd_init(Some("blink"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init(app_name: Option<&str>) -> Result<()> {
    init_in(&env::current_dir()?, app_name)
}

fn init_in(project_root: &Path, app_name: Option<&str>) -> Result<()> {
    if ConfigLoader::exists(project_root) {
        println!(
            "{} Config file already exists: {}",
            icon(WARNING),
            style(CONFIG_FILE_NAME).cyan()
        );
        println!("   Delete it first or edit manually to update.");
        return Ok(());
    }

    ConfigLoader::save(&starter_config(app_name), project_root)?;

    println!(
        "{} Created {}",
        icon(CHECKMARK),
        style(CONFIG_FILE_NAME).bold().green()
    );
    Ok(())
}

fn starter_config(app_name: Option<&str>) -> ConfigFile {
    ConfigFile {
        report: ReportSettings {
            app_name: app_name.map(str::to_string),
            precision: Some(DEFAULT_PRECISION),
            flash_total_override: None,
        },
        collect: CollectSettings {
            build_dir: Some(PathBuf::from("build")),
            out: Some(PathBuf::from("size.json")),
            ..Default::default()
        },
    }
}
