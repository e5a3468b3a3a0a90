//! Test fixture helpers for size reports and build directories
//!
//! Provides the report shapes the size tool has produced over time and a
//! minimal build directory layout.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// `idf.py size --format json2` output
pub const JSON2_REPORT: &str = r#"{
  "version": "1.1",
  "target": "esp32",
  "layout": [
    {"name": "Flash Code", "used": 500, "total": 10000},
    {"name": "Flash Data", "used": 50, "total": 1000},
    {"name": "DRAM", "used": 1234, "total": 5000},
    {"name": "IRAM", "used": 100, "total": 2000}
  ]
}"#;

/// Older `--format json` output with per-region objects
pub const LEGACY_REPORT: &str = r#"{
  "dram": {"used": 1300, "total": 5000},
  "iram": {"used": 80, "total": 2000}
}"#;

/// Write `contents` to `name` inside `dir`
pub fn write_file(dir: &Path, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    Ok(path)
}

/// Write a canonical size record
pub fn write_record(
    dir: &Path,
    name: &str,
    flash: (u64, u64),
    dram: (u64, u64),
    iram: (u64, u64),
) -> anyhow::Result<PathBuf> {
    let json = format!(
        r#"{{"flash": {}, "dram": {}, "iram": {}, "ram": {}, "flash_total": {}, "dram_total": {}, "iram_total": {}}}"#,
        flash.0,
        dram.0,
        iram.0,
        dram.0 + iram.0,
        flash.1,
        dram.1,
        iram.1
    );
    write_file(dir, name, &json)
}

/// Creates a build directory with `project_description.json` and an app binary
///
/// # Returns
///
/// A tuple of (TempDir, PathBuf to the build directory) - the TempDir must be kept alive
pub fn create_build_dir(bin_size: usize) -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let build_dir = temp_dir.path().join("build");
    fs::create_dir_all(&build_dir)?;

    fs::write(
        build_dir.join("project_description.json"),
        r#"{
  "project_name": "blink",
  "app_elf": "blink.elf",
  "app_bin": "blink.bin"
}"#,
    )?;
    fs::write(build_dir.join("blink.bin"), vec![0u8; bin_size])?;

    Ok((temp_dir, build_dir))
}
