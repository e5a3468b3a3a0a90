//! Canonical size record shared by the extractor and the delta reporter
//!
//! The persisted form is a flat JSON object:
//!
//! ```json
//! {"flash": 550, "dram": 1234, "iram": 100, "ram": 1334,
//!  "flash_total": 11000, "dram_total": 5000, "iram_total": 2000}
//! ```
//!
//! A `*_total` of 0 means the capacity was not reported.

use crate::value::lenient_u64;
use serde::{Deserialize, Serialize};

/// Capacity of a memory region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// The size tool did not report a capacity
    Unknown,
    /// Reported capacity in bytes (never 0)
    Known(u64),
}

impl Capacity {
    /// Interpret a stored total, where 0 is the "unknown" sentinel
    pub fn from_total(total: u64) -> Self {
        if total == 0 {
            Self::Unknown
        } else {
            Self::Known(total)
        }
    }

    /// Capacity in bytes, if known
    pub fn bytes(self) -> Option<u64> {
        match self {
            Self::Unknown => None,
            Self::Known(bytes) => Some(bytes),
        }
    }
}

/// Normalized memory usage of one firmware build
///
/// # Examples
///
/// ```
/// use idf_size_delta::record::CanonicalSizeRecord;
///
/// let record = CanonicalSizeRecord {
///     dram_used: 1234,
///     iram_used: 100,
///     ..Default::default()
/// };
/// assert_eq!(record.ram_used(), 1334);
///
/// let json = record.to_json().unwrap();
/// assert_eq!(CanonicalSizeRecord::from_json_str(&json), record);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord", into = "StoredRecord")]
pub struct CanonicalSizeRecord {
    /// Flash bytes occupied by code and data
    pub flash_used: u64,
    /// Flash partition capacity (0 = unknown)
    pub flash_total: u64,
    /// Data RAM bytes used
    pub dram_used: u64,
    /// Data RAM capacity (0 = unknown)
    pub dram_total: u64,
    /// Instruction RAM bytes used
    pub iram_used: u64,
    /// Instruction RAM capacity (0 = unknown)
    pub iram_total: u64,
}

impl CanonicalSizeRecord {
    /// Combined RAM usage (DRAM + IRAM)
    pub fn ram_used(&self) -> u64 {
        self.dram_used.saturating_add(self.iram_used)
    }

    /// Flash capacity
    pub fn flash_capacity(&self) -> Capacity {
        Capacity::from_total(self.flash_total)
    }

    /// DRAM capacity
    pub fn dram_capacity(&self) -> Capacity {
        Capacity::from_total(self.dram_total)
    }

    /// IRAM capacity
    pub fn iram_capacity(&self) -> Capacity {
        Capacity::from_total(self.iram_total)
    }

    /// Combined RAM capacity, known only when both DRAM and IRAM capacities are
    pub fn ram_capacity(&self) -> Capacity {
        match (self.dram_capacity(), self.iram_capacity()) {
            (Capacity::Known(dram), Capacity::Known(iram)) => {
                Capacity::Known(dram.saturating_add(iram))
            }
            _ => Capacity::Unknown,
        }
    }

    /// Copy of this record with the flash total replaced, unless `override_total` is 0
    pub fn with_flash_total_override(mut self, override_total: u64) -> Self {
        if override_total > 0 {
            self.flash_total = override_total;
        }
        self
    }

    /// Parse a persisted record
    ///
    /// Never fails: unparsable text yields a zero record so a broken input
    /// shows up as "0 bytes" in the report instead of aborting CI.
    pub fn from_json_str(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Unreadable size record, using zero values: {}", e);
                Self::default()
            }
        }
    }

    /// Compact JSON with stable key order
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize size record: {}", e))
    }

    /// Pretty-printed JSON with stable key order
    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize size record: {}", e))
    }
}

/// On-disk layout of [`CanonicalSizeRecord`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecord {
    #[serde(default, deserialize_with = "lenient_u64")]
    flash: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    dram: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    iram: u64,
    /// Written for consumers, recomputed on read
    #[serde(default, deserialize_with = "lenient_u64")]
    ram: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    flash_total: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    dram_total: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    iram_total: u64,
}

impl From<StoredRecord> for CanonicalSizeRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            flash_used: stored.flash,
            flash_total: stored.flash_total,
            dram_used: stored.dram,
            dram_total: stored.dram_total,
            iram_used: stored.iram,
            iram_total: stored.iram_total,
        }
    }
}

impl From<CanonicalSizeRecord> for StoredRecord {
    fn from(record: CanonicalSizeRecord) -> Self {
        Self {
            flash: record.flash_used,
            dram: record.dram_used,
            iram: record.iram_used,
            ram: record.ram_used(),
            flash_total: record.flash_total,
            dram_total: record.dram_total,
            iram_total: record.iram_total,
        }
    }
}
