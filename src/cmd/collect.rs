//! Collect command implementation
//!
//! Handles the `idf-size-delta collect` command which reads an ESP-IDF build
//! directory and writes its canonical size record.

use anyhow::Result;
use console::style;
use std::env;
use std::path::{Path, PathBuf};

use super::files::write_output;
use crate::collect::{SizeCollector, SizeSource, IDF_PY};
use crate::config::ConfigLoader;
use crate::fmt::{format_bytes, icon, CHART, CHECKMARK, WARNING};
use crate::infra::RealFileSystem;

/// Collect a size record from a build directory
///
/// Missing build outputs or size tools never fail the command; the record
/// falls back to the application binary size or to zero values.
///
/// # Examples
///
/// ```no_run
/// use idf_size_delta::cmd::collect::cmd_collect;
/// use std::path::Path;
///
/// cmd_collect(Some(Path::new("build")), None, Some(Path::new("size.json")), None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_collect(
    build_dir: Option<&Path>,
    app_dir: Option<&Path>,
    out: Option<&Path>,
    flash_total_override: Option<u64>,
) -> Result<()> {
    let config = ConfigLoader::load(&env::current_dir()?)?;
    let idf_path = env::var_os("IDF_PATH").map(PathBuf::from);
    let options = config.collect_options(build_dir, app_dir, flash_total_override, idf_path);
    let out = config.collect_out(out);

    println!(
        "{} Collecting sizes from {}",
        icon(CHART),
        style(options.build_dir.display()).cyan()
    );

    if which::which(IDF_PY).is_err() {
        eprintln!(
            "{} {} not found in PATH, falling back to idf_size.py or the binary size",
            icon(WARNING),
            style(IDF_PY).yellow()
        );
    }

    let outcome = SizeCollector::new(options).collect();
    let record = outcome.record;

    write_output(Some(&out), &record.to_json()?, &RealFileSystem)?;

    println!(
        "{} Wrote {} ({})",
        icon(CHECKMARK),
        style(out.display()).bold(),
        describe_source(outcome.source)
    );
    println!(
        "   FLASH {}  DRAM {}  IRAM {}",
        style(format_bytes(record.flash_used)).green(),
        style(format_bytes(record.dram_used)).green(),
        style(format_bytes(record.iram_used)).green()
    );

    Ok(())
}

fn describe_source(source: SizeSource) -> String {
    match source {
        SizeSource::IdfPySize(format) => format!("idf.py size --format {}", format),
        SizeSource::IdfSizeScript => "idf_size.py --json".to_string(),
        SizeSource::ArtifactOnly => "application binary size only".to_string(),
        SizeSource::NoProjectDescription => "no build found, zero values".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_source_names_size_format() {
        assert_eq!(
            describe_source(SizeSource::IdfPySize("json2")),
            "idf.py size --format json2"
        );
        assert!(describe_source(SizeSource::NoProjectDescription).contains("zero"));
    }
}
