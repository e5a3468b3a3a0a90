//! Configuration file data structures

use crate::collect::CollectOptions;
use crate::error::SizeDeltaError;
use crate::report::{ReportConfig, DEFAULT_PRECISION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".idf-size-delta.toml";

/// Largest supported number of percentage decimals
pub const MAX_PRECISION: usize = 10;

/// idf-size-delta configuration file structure
///
/// ```toml
/// [report]
/// app-name = "blink"
/// precision = 1
/// flash-total-override = 4194304
///
/// [collect]
/// build-dir = "build"
/// out = "size.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Report rendering settings
    #[serde(default)]
    pub report: ReportSettings,

    /// Size collection settings
    #[serde(default)]
    pub collect: CollectSettings,
}

/// `[report]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReportSettings {
    /// Application name used in the heading and comment marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Decimal places for percentages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,

    /// Flash capacity applied to both builds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash_total_override: Option<u64>,
}

/// `[collect]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CollectSettings {
    /// ESP-IDF build directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<PathBuf>,

    /// Project directory `idf.py` runs in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_dir: Option<PathBuf>,

    /// Output path for the canonical record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,

    /// Flash capacity recorded in the output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash_total_override: Option<u64>,

    /// Python interpreter for `idf_size.py`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,
}

impl ConfigFile {
    /// Validate value ranges
    pub fn validate(&self) -> Result<(), SizeDeltaError> {
        if let Some(precision) = self.report.precision {
            check_precision(precision)?;
        }
        Ok(())
    }

    /// Report options: command-line values win over file values, file values over defaults
    ///
    /// # Examples
    ///
    /// ```
    /// use idf_size_delta::config::{ConfigFile, ReportSettings};
    ///
    /// let config = ConfigFile {
    ///     report: ReportSettings { precision: Some(1), ..Default::default() },
    ///     ..Default::default()
    /// };
    ///
    /// assert_eq!(config.report_config(None, None).unwrap().precision, 1);
    /// assert_eq!(config.report_config(Some(3), None).unwrap().precision, 3);
    /// assert!(config.report_config(Some(50), None).is_err());
    /// ```
    pub fn report_config(
        &self,
        precision: Option<usize>,
        flash_total_override: Option<u64>,
    ) -> Result<ReportConfig, SizeDeltaError> {
        let precision = precision
            .or(self.report.precision)
            .unwrap_or(DEFAULT_PRECISION);
        check_precision(precision)?;
        Ok(ReportConfig {
            flash_total_override: flash_total_override
                .or(self.report.flash_total_override)
                .unwrap_or(0),
            precision,
        })
    }

    /// Collection options, with the same precedence as [`ConfigFile::report_config`]
    ///
    /// The app directory defaults to the build directory's parent, where
    /// `idf.py` expects to run.
    pub fn collect_options(
        &self,
        build_dir: Option<&Path>,
        app_dir: Option<&Path>,
        flash_total_override: Option<u64>,
        idf_path: Option<PathBuf>,
    ) -> CollectOptions {
        let defaults = CollectOptions::default();
        let build_dir = build_dir
            .map(Path::to_path_buf)
            .or_else(|| self.collect.build_dir.clone())
            .unwrap_or(defaults.build_dir);
        let app_dir = app_dir
            .map(Path::to_path_buf)
            .or_else(|| self.collect.app_dir.clone())
            .unwrap_or_else(|| match build_dir.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => defaults.app_dir,
            });

        CollectOptions {
            build_dir,
            app_dir,
            flash_total_override: flash_total_override
                .or(self.collect.flash_total_override)
                .unwrap_or(0),
            idf_path,
            python: self.collect.python.clone().unwrap_or(defaults.python),
        }
    }

    /// Output path for `collect`
    pub fn collect_out(&self, out: Option<&Path>) -> PathBuf {
        out.map(Path::to_path_buf)
            .or_else(|| self.collect.out.clone())
            .unwrap_or_else(|| PathBuf::from("size.json"))
    }
}

fn check_precision(precision: usize) -> Result<(), SizeDeltaError> {
    if precision > MAX_PRECISION {
        return Err(SizeDeltaError::InvalidPrecision {
            precision,
            max: MAX_PRECISION,
        });
    }
    Ok(())
}
