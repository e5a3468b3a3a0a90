//! Size collection from an ESP-IDF build directory
//!
//! Locates the application binary through `project_description.json`, asks
//! the size tool for a JSON report and turns it into a
//! [`CanonicalSizeRecord`]. Collection never fails: every missing piece
//! degrades to zero values so the report still renders.
//!
//! Tool order:
//! 1. `idf.py size --format json2`, then `--format json`, in the app directory
//! 2. `python $IDF_PATH/tools/idf_size.py --json <elf>` (used values only)
//! 3. nothing but the `.bin` size for FLASH

use crate::extract::{self, extract_embedded_json};
use crate::infra::{CommandExecutor, FileSystem, RealCommandExecutor, RealFileSystem};
use crate::record::CanonicalSizeRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Build metadata file written by the ESP-IDF build system
pub const PROJECT_DESCRIPTION: &str = "project_description.json";

/// `idf.py size --format` values, tried in order
pub const SIZE_FORMATS: [&str; 2] = ["json2", "json"];

/// Size tool entry point
pub const IDF_PY: &str = "idf.py";

/// Where the collected numbers came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeSource {
    /// `idf.py size` with the given format
    IdfPySize(&'static str),
    /// `idf_size.py --json` fallback
    IdfSizeScript,
    /// No size tool output; FLASH from the `.bin` size only
    ArtifactOnly,
    /// No `project_description.json`; all values are zero
    NoProjectDescription,
}

/// Collection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOptions {
    /// ESP-IDF build directory
    pub build_dir: PathBuf,
    /// Project directory `idf.py` runs in
    pub app_dir: PathBuf,
    /// Flash capacity to record (0 = keep the reported total)
    pub flash_total_override: u64,
    /// `$IDF_PATH`, for the `idf_size.py` fallback
    pub idf_path: Option<PathBuf>,
    /// Python interpreter for `idf_size.py`
    pub python: String,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("build"),
            app_dir: PathBuf::from("."),
            flash_total_override: 0,
            idf_path: None,
            python: "python3".to_string(),
        }
    }
}

/// Collected record and its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOutcome {
    /// Normalized sizes
    pub record: CanonicalSizeRecord,
    /// Tool that produced them
    pub source: SizeSource,
}

/// Subset of `project_description.json` we rely on
#[derive(Debug, Default, Deserialize)]
struct ProjectDescription {
    #[serde(default)]
    app_elf: String,
    #[serde(default)]
    app_bin: String,
}

/// Collects a size record from a build directory
pub struct SizeCollector<FS: FileSystem = RealFileSystem, CE: CommandExecutor = RealCommandExecutor>
{
    options: CollectOptions,
    fs: FS,
    cmd_executor: CE,
}

impl SizeCollector {
    /// Create a collector backed by the real filesystem and processes
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use idf_size_delta::collect::{CollectOptions, SizeCollector};
    ///
    /// let outcome = SizeCollector::new(CollectOptions::default()).collect();
    /// println!("{}", outcome.record.to_json()?);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn new(options: CollectOptions) -> Self {
        Self::with_infra(options, RealFileSystem, RealCommandExecutor)
    }
}

impl<FS: FileSystem, CE: CommandExecutor> SizeCollector<FS, CE> {
    /// Create a collector with custom infrastructure
    pub fn with_infra(options: CollectOptions, fs: FS, cmd_executor: CE) -> Self {
        Self {
            options,
            fs,
            cmd_executor,
        }
    }

    /// Collect sizes for the configured build
    pub fn collect(&self) -> CollectOutcome {
        let Some(description) = self.read_project_description() else {
            log::warn!(
                "{} not found in {}, reporting zero sizes",
                PROJECT_DESCRIPTION,
                self.options.build_dir.display()
            );
            return CollectOutcome {
                record: CanonicalSizeRecord::default(),
                source: SizeSource::NoProjectDescription,
            };
        };

        let artifact_bytes = self
            .resolve(&description.app_bin)
            .and_then(|bin| self.fs.file_size(&bin));
        log::debug!("Application binary size: {:?}", artifact_bytes);

        let (record, source) = if let Some((format, report)) = self.run_idf_py_size() {
            let record = extract::apply_artifact_flash(extract::extract(&report), artifact_bytes);
            (record, SizeSource::IdfPySize(format))
        } else if let Some(report) = self
            .resolve(&description.app_elf)
            .and_then(|elf| self.run_idf_size_script(&elf))
        {
            let parsed = extract::extract(&report);
            let record = CanonicalSizeRecord {
                flash_used: artifact_bytes.unwrap_or(0),
                dram_used: parsed.dram_used,
                iram_used: parsed.iram_used,
                ..Default::default()
            };
            (record, SizeSource::IdfSizeScript)
        } else {
            log::warn!("No size tool output available, FLASH taken from the application binary");
            let record = CanonicalSizeRecord {
                flash_used: artifact_bytes.unwrap_or(0),
                ..Default::default()
            };
            (record, SizeSource::ArtifactOnly)
        };

        CollectOutcome {
            record: record.with_flash_total_override(self.options.flash_total_override),
            source,
        }
    }

    fn read_project_description(&self) -> Option<ProjectDescription> {
        let path = self.options.build_dir.join(PROJECT_DESCRIPTION);
        let contents = self.fs.read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(description) => Some(description),
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                Some(ProjectDescription::default())
            }
        }
    }

    /// Relative artifact paths are taken relative to the build directory
    fn resolve(&self, artifact: &str) -> Option<PathBuf> {
        if artifact.is_empty() {
            return None;
        }
        let path = Path::new(artifact);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(self.options.build_dir.join(path))
        }
    }

    fn run_idf_py_size(&self) -> Option<(&'static str, Value)> {
        for format in SIZE_FORMATS {
            let app_dir = &self.options.app_dir;
            let result = self.cmd_executor.execute(
                |cmd| {
                    cmd.current_dir(app_dir)
                        .arg("size")
                        .arg("--format")
                        .arg(format)
                },
                IDF_PY,
            );
            match result {
                Ok(output) if output.status.success() => {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    if let Some(report) = extract_embedded_json(&stdout) {
                        log::debug!("Using `{} size --format {}` output", IDF_PY, format);
                        return Some((format, report));
                    }
                    log::debug!("`{} size --format {}` printed no JSON", IDF_PY, format);
                }
                Ok(output) => {
                    log::debug!(
                        "`{} size --format {}` exited with {}",
                        IDF_PY,
                        format,
                        output.status
                    );
                }
                Err(e) => {
                    log::debug!("Failed to run {}: {}", IDF_PY, e);
                    // Not on PATH; other formats will fail the same way
                    return None;
                }
            }
        }
        None
    }

    fn run_idf_size_script(&self, elf: &Path) -> Option<Value> {
        let script = self
            .options
            .idf_path
            .as_ref()?
            .join("tools")
            .join("idf_size.py");
        self.fs.file_size(&script)?;

        let output = self
            .cmd_executor
            .execute(
                |cmd| cmd.arg(&script).arg("--json").arg(elf),
                &self.options.python,
            )
            .map_err(|e| log::debug!("Failed to run {}: {}", script.display(), e))
            .ok()?;
        if !output.status.success() {
            log::debug!("{} exited with {}", script.display(), output.status);
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .ok()
            .or_else(|| extract_embedded_json(&stdout))
    }
}
