//! Render command implementation
//!
//! Handles the `idf-size-delta render` command which compares a base and a
//! PR size record and prints the delta report for a PR comment.

use anyhow::Result;
use std::env;
use std::path::Path;

use super::files::{load_record, write_output};
use crate::config::{ConfigFile, ConfigLoader};
use crate::error::SizeDeltaError;
use crate::infra::RealFileSystem;
use crate::report::DeltaReport;

/// Output format for the delta report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Markdown table for a PR comment
    #[default]
    Markdown,
    /// Machine-readable rows
    Json,
}

/// Options for [`cmd_render`]
#[derive(Debug, Clone)]
pub struct RenderArgs<'a> {
    /// Base branch record
    pub base: &'a Path,
    /// PR record
    pub head: &'a Path,
    /// Application name (falls back to the config file)
    pub app_name: Option<&'a str>,
    /// Flash capacity applied to both records
    pub flash_total_override: Option<u64>,
    /// Decimal places for percentages
    pub precision: Option<usize>,
    /// Output format
    pub format: ReportFormat,
    /// Output path (stdout when absent)
    pub out: Option<&'a Path>,
}

impl<'a> RenderArgs<'a> {
    /// Markdown report of `head` against `base` with every option unset
    pub fn new(base: &'a Path, head: &'a Path) -> Self {
        Self {
            base,
            head,
            app_name: None,
            flash_total_override: None,
            precision: None,
            format: ReportFormat::Markdown,
            out: None,
        }
    }
}

/// Render the base vs PR delta report
///
/// Missing or unreadable records are reported as zero sizes.
///
/// # Examples
///
/// ```no_run
/// use idf_size_delta::cmd::render::{cmd_render, RenderArgs};
/// use std::path::Path;
///
/// cmd_render(&RenderArgs {
///     app_name: Some("blink"),
///     ..RenderArgs::new(Path::new("base.json"), Path::new("pr.json"))
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if no application name is given, the precision is out
/// of range, or the output file cannot be written.
pub fn cmd_render(args: &RenderArgs<'_>) -> Result<()> {
    let config = ConfigLoader::load(&env::current_dir()?)?;
    let report = build_report(args, &config)?;
    let output = match args.format {
        ReportFormat::Markdown => report.to_markdown(),
        ReportFormat::Json => report.to_json()?,
    };
    write_output(args.out, &output, &RealFileSystem)
}

fn build_report(args: &RenderArgs<'_>, config: &ConfigFile) -> Result<DeltaReport> {
    let app_name = args
        .app_name
        .map(str::to_string)
        .or_else(|| config.report.app_name.clone())
        .ok_or_else(|| SizeDeltaError::MissingAppName {
            operation: "render".to_string(),
        })?;
    let report_config = config.report_config(args.precision, args.flash_total_override)?;

    let base = load_record(args.base, &RealFileSystem);
    let head = load_record(args.head, &RealFileSystem);
    log::debug!("Base: {:?}", base);
    log::debug!("Head: {:?}", head);

    Ok(DeltaReport::compute(&app_name, &base, &head, &report_config))
}
