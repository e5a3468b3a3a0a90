//! Size-report extraction
//!
//! Converts the JSON printed by `idf.py size --format json2|json` (or the
//! older `idf_size.py --json`) into a [`CanonicalSizeRecord`]. The tool's
//! shape has drifted across ESP-IDF releases, so extraction is best effort:
//! it never fails and unresolved fields stay 0.
//!
//! # Examples
//!
//! ```
//! use idf_size_delta::extract::extract_str;
//!
//! let record = extract_str(r#"{"layout": [
//!     {"name": "DRAM", "used": 1234, "total": 5000},
//!     {"name": "IRAM", "used": 100, "total": 2000},
//!     {"name": "Flash Code", "used": 500, "total": 10000},
//!     {"name": "Flash Data", "used": 50, "total": 1000}
//! ]}"#);
//!
//! assert_eq!(record.flash_used, 550);
//! assert_eq!(record.flash_total, 11000);
//! assert_eq!(record.ram_used(), 1334);
//! ```

pub mod rules;
pub mod schema;

pub use rules::{classify_segment, Region, SegmentRule, SEGMENT_RULES};
pub use schema::RawReport;

use crate::record::CanonicalSizeRecord;
use serde_json::Value;

/// Extract a canonical record from a parsed size report
pub fn extract(raw: &Value) -> CanonicalSizeRecord {
    let report = RawReport::classify(raw);
    log::debug!("Size report shape: {}", report.shape_name());
    report.parse().unwrap_or_else(|| {
        log::warn!("No memory usage found in size report, using zero values");
        CanonicalSizeRecord::default()
    })
}

/// Extract a canonical record from size-report text
///
/// Text that is not pure JSON is searched for an embedded object
/// (see [`extract_embedded_json`]); anything unparsable yields a zero record.
pub fn extract_str(text: &str) -> CanonicalSizeRecord {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => extract(&value),
        Err(e) => match extract_embedded_json(text) {
            Some(value) => extract(&value),
            None => {
                log::warn!("Size report is not valid JSON, using zero values: {}", e);
                CanonicalSizeRecord::default()
            }
        },
    }
}

/// Extract a record, falling back to a measured artifact size for flash
///
/// Flash usage reported by the JSON wins whenever it is non-zero; the
/// artifact size (e.g. the application `.bin`) fills in otherwise.
///
/// ```
/// use idf_size_delta::extract::extract_with_artifact;
/// use serde_json::json;
///
/// let legacy = json!({"dram": {"used": 10}, "iram": {"used": 5}});
/// assert_eq!(extract_with_artifact(&legacy, Some(4096)).flash_used, 4096);
///
/// let json2 = json!({"layout": [{"name": "Flash Code", "used": 700}]});
/// assert_eq!(extract_with_artifact(&json2, Some(4096)).flash_used, 700);
/// ```
pub fn extract_with_artifact(raw: &Value, artifact_bytes: Option<u64>) -> CanonicalSizeRecord {
    apply_artifact_flash(extract(raw), artifact_bytes)
}

pub(crate) fn apply_artifact_flash(
    mut record: CanonicalSizeRecord,
    artifact_bytes: Option<u64>,
) -> CanonicalSizeRecord {
    if record.flash_used == 0 {
        if let Some(bytes) = artifact_bytes {
            record.flash_used = bytes;
        }
    }
    record
}

/// Find the JSON object embedded in tool output
///
/// `idf.py` prints build chatter around the report; the object spans from
/// the first `{` to the last `}`.
pub fn extract_embedded_json(output: &str) -> Option<Value> {
    let start = output.find('{')?;
    let end = output.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&output[start..=end]).ok()
}
