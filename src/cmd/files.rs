//! Record and report file helpers shared by the commands
//!
//! Inputs degrade instead of failing: a missing or unreadable size file is
//! reported on stderr and read as a zero record, so CI still gets a report.

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::error::SizeDeltaError;
use crate::fmt::{icon, WARNING};
use crate::infra::FileSystem;
use crate::record::CanonicalSizeRecord;

/// Read a text input, `None` (with a warning) when it cannot be read
pub(crate) fn read_input<FS: FileSystem>(path: &Path, fs: &FS) -> Option<String> {
    match fs.read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(e) => {
            eprintln!(
                "{} Cannot read {} ({}), using zero values",
                icon(WARNING),
                style(path.display()).yellow(),
                e
            );
            None
        }
    }
}

/// Load a persisted canonical record, zero on any failure
pub(crate) fn load_record<FS: FileSystem>(path: &Path, fs: &FS) -> CanonicalSizeRecord {
    read_input(path, fs)
        .map(|text| CanonicalSizeRecord::from_json_str(&text))
        .unwrap_or_default()
}

/// Write `contents` to `path`, or to stdout when no path is given
pub(crate) fn write_output<FS: FileSystem>(
    path: Option<&Path>,
    contents: &str,
    fs: &FS,
) -> Result<()> {
    match path {
        Some(path) => {
            let mut text = contents.to_string();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            fs.write(path, text).map_err(|source| SizeDeltaError::Io {
                context: format!("writing {}", path.display()),
                source,
            })?;
            log::debug!("Wrote {}", path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}
