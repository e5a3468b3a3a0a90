//! Extract command implementation
//!
//! Handles the `idf-size-delta extract` command which normalizes an existing
//! size report (any supported schema) into a canonical record.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use super::files::{read_input, write_output};
use crate::extract::{apply_artifact_flash, extract_str};
use crate::infra::{FileSystem, RealFileSystem};
use crate::record::CanonicalSizeRecord;

/// Read the report from stdin instead of a file
pub const STDIN: &str = "-";

/// Options for [`cmd_extract`]
#[derive(Debug, Clone, Default)]
pub struct ExtractArgs<'a> {
    /// Report path, or `-` for stdin
    pub input: &'a str,
    /// Application binary whose size stands in for a missing FLASH value
    pub artifact: Option<&'a Path>,
    /// Output path (stdout when absent)
    pub out: Option<&'a Path>,
    /// Flash capacity to record
    pub flash_total_override: Option<u64>,
    /// Pretty-print the record
    pub pretty: bool,
}

/// Normalize a size report into a canonical record
///
/// # Examples
///
/// ```no_run
/// use idf_size_delta::cmd::extract::{cmd_extract, ExtractArgs};
///
/// cmd_extract(&ExtractArgs { input: "size-report.json", ..Default::default() })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_extract(args: &ExtractArgs<'_>) -> Result<()> {
    let text = if args.input == STDIN {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read size report from stdin")?;
        Some(buffer)
    } else {
        read_input(Path::new(args.input), &RealFileSystem)
    };

    let record = extract_record(text.as_deref(), args, &RealFileSystem);
    let json = if args.pretty {
        record.to_json_pretty()?
    } else {
        record.to_json()?
    };
    write_output(args.out, &json, &RealFileSystem)
}

fn extract_record<FS: FileSystem>(
    text: Option<&str>,
    args: &ExtractArgs<'_>,
    fs: &FS,
) -> CanonicalSizeRecord {
    let record = text.map(extract_str).unwrap_or_default();
    let artifact_bytes = args.artifact.and_then(|path| {
        let size = fs.file_size(path);
        if size.is_none() {
            log::warn!("Artifact {} not readable, ignoring", path.display());
        }
        size
    });
    apply_artifact_flash(record, artifact_bytes)
        .with_flash_total_override(args.flash_total_override.unwrap_or(0))
}
