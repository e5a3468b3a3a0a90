//! Base vs PR size delta reporting
//!
//! Compares two [`CanonicalSizeRecord`]s and produces one row per metric
//! (FLASH, DRAM, IRAM, RAM). Percentages are rounded before the delta
//! percentage is taken, so the displayed delta always equals the difference
//! of the two displayed percentages.
//!
//! # Examples
//!
//! ```
//! use idf_size_delta::record::CanonicalSizeRecord;
//! use idf_size_delta::report::{render, ReportConfig};
//!
//! let base = CanonicalSizeRecord { flash_used: 1000, ..Default::default() };
//! let head = CanonicalSizeRecord { flash_used: 1200, ..Default::default() };
//!
//! let markdown = render("blink", &base, &head, &ReportConfig::default());
//! assert!(markdown.contains("| FLASH | 1,000 bytes | 1,200 bytes | 🔺 +200 bytes |"));
//! assert!(markdown.ends_with("<!-- size-delta:blink -->"));
//! ```

pub mod markdown;

pub use markdown::{comment_marker, render};

use crate::fmt::{format_byte_count, format_percent, format_signed_bytes};
use crate::record::{CanonicalSizeRecord, Capacity};
use serde::{Deserialize, Serialize};

/// Marker prefixed to a growing delta
pub const INCREASE_GLYPH: &str = "🔺";

/// Marker prefixed to a shrinking delta
pub const DECREASE_GLYPH: &str = "⬇️";

/// Default number of decimals for percentages
pub const DEFAULT_PRECISION: usize = 2;

/// Report formatting options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Flash capacity applied to both builds (0 = use each record's own total)
    pub flash_total_override: u64,
    /// Decimal places for percentages
    pub precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            flash_total_override: 0,
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Reported metric, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Flash code + data
    Flash,
    /// Data RAM
    Dram,
    /// Instruction RAM
    Iram,
    /// DRAM + IRAM
    Ram,
}

impl Metric {
    /// All metrics in report order
    pub const ALL: [Metric; 4] = [Metric::Flash, Metric::Dram, Metric::Iram, Metric::Ram];

    /// Row label
    pub fn label(self) -> &'static str {
        match self {
            Self::Flash => "FLASH",
            Self::Dram => "DRAM",
            Self::Iram => "IRAM",
            Self::Ram => "RAM (DRAM+IRAM)",
        }
    }

    fn used(self, record: &CanonicalSizeRecord) -> u64 {
        match self {
            Self::Flash => record.flash_used,
            Self::Dram => record.dram_used,
            Self::Iram => record.iram_used,
            Self::Ram => record.ram_used(),
        }
    }

    fn capacity(self, record: &CanonicalSizeRecord, config: &ReportConfig) -> Capacity {
        match self {
            Self::Flash => record
                .with_flash_total_override(config.flash_total_override)
                .flash_capacity(),
            Self::Dram => record.dram_capacity(),
            Self::Iram => record.iram_capacity(),
            Self::Ram => record.ram_capacity(),
        }
    }
}

/// Usage of one metric in one build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricCell {
    /// Bytes used
    pub used: u64,
    /// Rounded share of capacity, absent when the capacity is unknown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

impl MetricCell {
    fn measure(metric: Metric, record: &CanonicalSizeRecord, config: &ReportConfig) -> Self {
        let used = metric.used(record);
        let percent = metric
            .capacity(record, config)
            .bytes()
            .map(|total| round_to(used as f64 / total as f64 * 100.0, config.precision));
        Self { used, percent }
    }

    fn render(&self, precision: usize) -> String {
        match self.percent {
            Some(pct) => format!(
                "{} ({}%)",
                format_byte_count(self.used),
                format_percent(pct, precision)
            ),
            None => format_byte_count(self.used),
        }
    }
}

/// One comparison row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaRow {
    /// Metric compared
    pub metric: Metric,
    /// Base build
    pub base: MetricCell,
    /// PR build
    pub head: MetricCell,
    /// `head - base` in bytes
    pub delta_bytes: i64,
    /// `head% - base%`, absent unless both percentages are known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_percent: Option<f64>,
}

impl DeltaRow {
    /// Compare one metric across two builds
    pub fn compute(
        metric: Metric,
        base: &CanonicalSizeRecord,
        head: &CanonicalSizeRecord,
        config: &ReportConfig,
    ) -> Self {
        let base = MetricCell::measure(metric, base, config);
        let head = MetricCell::measure(metric, head, config);
        let delta_percent = match (base.percent, head.percent) {
            (Some(b), Some(h)) => Some(round_to(h - b, config.precision)),
            _ => None,
        };
        Self {
            metric,
            base,
            head,
            delta_bytes: signed_delta(base.used, head.used),
            delta_percent,
        }
    }

    /// Base column text
    pub fn base_cell(&self, precision: usize) -> String {
        self.base.render(precision)
    }

    /// PR column text
    pub fn head_cell(&self, precision: usize) -> String {
        self.head.render(precision)
    }

    /// Delta column text: glyph, signed bytes, optional signed percentage
    pub fn delta_cell(&self, precision: usize) -> String {
        let glyph = match self.delta_bytes {
            d if d > 0 => format!("{} ", INCREASE_GLYPH),
            d if d < 0 => format!("{} ", DECREASE_GLYPH),
            _ => String::new(),
        };
        let pct = match self.delta_percent {
            Some(pct) => {
                let sign = if pct > 0.0 { "+" } else { "" };
                format!(" ({}{}%)", sign, format_percent(pct, precision))
            }
            None => String::new(),
        };
        format!("{}{}{}", glyph, format_signed_bytes(self.delta_bytes), pct)
    }
}

/// Full base vs PR comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaReport {
    /// Application the builds belong to
    pub app_name: String,
    /// Decimal places used for percentages
    pub precision: usize,
    /// Rows in [`Metric::ALL`] order
    pub rows: Vec<DeltaRow>,
}

impl DeltaReport {
    /// Compare two builds; inputs are not modified
    pub fn compute(
        app_name: &str,
        base: &CanonicalSizeRecord,
        head: &CanonicalSizeRecord,
        config: &ReportConfig,
    ) -> Self {
        Self {
            app_name: app_name.to_string(),
            precision: config.precision,
            rows: Metric::ALL
                .iter()
                .map(|&metric| DeltaRow::compute(metric, base, head, config))
                .collect(),
        }
    }

    /// Row for `metric`
    pub fn row(&self, metric: Metric) -> Option<&DeltaRow> {
        self.rows.iter().find(|row| row.metric == metric)
    }

    /// Pretty-printed JSON for machine consumers
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize delta report: {}", e))
    }
}

/// Round to `precision` decimals, ties to even on the exact binary value
///
/// Formatting is correctly rounded, so `62.5` becomes `62` and `0.25` (at one
/// decimal) becomes `0.2`.
fn round_to(value: f64, precision: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // -0.0 + 0.0 == +0.0
    format!("{:.*}", precision, value)
        .parse::<f64>()
        .map_or(value, |rounded| rounded + 0.0)
}

fn signed_delta(base: u64, head: u64) -> i64 {
    let delta = i128::from(head) - i128::from(base);
    delta.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
