//! Recognized size-report shapes
//!
//! Each JSON level is discriminated once into a [`RawReport`] variant and
//! then parsed by the variant's own logic. Unrecognized levels fall back to
//! a prefix scan followed by a depth-first search of nested values.

use super::rules::{classify_segment, Region};
use crate::record::CanonicalSizeRecord;
use crate::value::{coerce_u64, field_u64};
use serde_json::{Map, Value};

/// Key holding the segment list in `--format json2` output
const LAYOUT_KEY: &str = "layout";

/// Keys holding the used-bytes map in old `idf_size.py --json` output
const TOTALS_KEYS: [&str; 2] = ["total", "Totals"];

/// One JSON level, discriminated by shape
#[derive(Debug, Clone, PartialEq)]
pub enum RawReport<'a> {
    /// `{"layout": [{"name": .., "used": .., "total": ..}, ..]}` with at least one recognized segment
    SegmentList(&'a [Value]),
    /// `{"dram": {"used": .., "total"|"available": ..}, "iram": {..}}`, both sides carrying `used`
    ///
    /// A single region object is left to the generic prefix scan.
    Legacy {
        /// DRAM object
        dram: &'a Map<String, Value>,
        /// IRAM object
        iram: &'a Map<String, Value>,
    },
    /// `{"total": {"dram": N, "iram": N}}` (used values only)
    Totals(&'a Map<String, Value>),
    /// Anything else
    Unrecognized(&'a Value),
}

impl<'a> RawReport<'a> {
    /// Discriminate a JSON level, in precedence order
    pub fn classify(value: &'a Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::Unrecognized(value);
        };

        if let Some(segments) = object.get(LAYOUT_KEY).and_then(Value::as_array) {
            if segments.iter().any(|s| segment_region(s).is_some()) {
                return Self::SegmentList(segments);
            }
            log::debug!("Layout list has no recognized segments, trying other shapes");
        }

        let dram = used_object(object, "dram");
        let iram = used_object(object, "iram");
        if let (Some(dram), Some(iram)) = (dram, iram) {
            return Self::Legacy { dram, iram };
        }

        for key in TOTALS_KEYS {
            if let Some(totals) = object.get(key).and_then(Value::as_object) {
                if totals.contains_key("dram") || totals.contains_key("iram") {
                    return Self::Totals(totals);
                }
            }
        }

        Self::Unrecognized(value)
    }

    /// Short shape name for logs
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::SegmentList(_) => "segment-list",
            Self::Legacy { .. } => "legacy-object",
            Self::Totals(_) => "totals-map",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    /// Parse this level; `None` when nothing usable was found
    pub fn parse(&self) -> Option<CanonicalSizeRecord> {
        match self {
            Self::SegmentList(segments) => Some(parse_segments(segments)),
            Self::Legacy { dram, iram } => Some(parse_legacy(dram, iram)),
            Self::Totals(totals) => Some(CanonicalSizeRecord {
                dram_used: field_u64(totals, "dram").unwrap_or(0),
                iram_used: field_u64(totals, "iram").unwrap_or(0),
                ..Default::default()
            }),
            Self::Unrecognized(value) => scan_generic(value),
        }
    }
}

/// Used/total pair for one region
#[derive(Debug, Clone, Copy, Default)]
struct Usage {
    used: u64,
    total: u64,
}

fn segment_region(segment: &Value) -> Option<Region> {
    let name = segment.as_object()?.get("name")?.as_str()?;
    classify_segment(name)
}

fn parse_segments(segments: &[Value]) -> CanonicalSizeRecord {
    let mut flash_code = Usage::default();
    let mut flash_data = Usage::default();
    let mut dram = Usage::default();
    let mut iram = Usage::default();

    for segment in segments {
        let (Some(object), Some(region)) = (segment.as_object(), segment_region(segment)) else {
            continue;
        };
        let usage = Usage {
            used: field_u64(object, "used").unwrap_or(0),
            total: field_u64(object, "total").unwrap_or(0),
        };
        // Last segment of a region wins
        match region {
            Region::FlashCode => flash_code = usage,
            Region::FlashData => flash_data = usage,
            Region::Dram => dram = usage,
            Region::Iram => iram = usage,
        }
    }

    CanonicalSizeRecord {
        flash_used: flash_code.used.saturating_add(flash_data.used),
        flash_total: flash_code.total.saturating_add(flash_data.total),
        dram_used: dram.used,
        dram_total: dram.total,
        iram_used: iram.used,
        iram_total: iram.total,
    }
}

fn used_object<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    object
        .get(key)
        .and_then(Value::as_object)
        .filter(|inner| inner.contains_key("used"))
}

fn legacy_usage(object: &Map<String, Value>) -> Usage {
    let total = match field_u64(object, "total") {
        Some(total) if total > 0 => total,
        _ => field_u64(object, "available").unwrap_or(0),
    };
    Usage {
        used: field_u64(object, "used").unwrap_or(0),
        total,
    }
}

fn parse_legacy(dram: &Map<String, Value>, iram: &Map<String, Value>) -> CanonicalSizeRecord {
    let dram = legacy_usage(dram);
    let iram = legacy_usage(iram);
    CanonicalSizeRecord {
        dram_used: dram.used,
        dram_total: dram.total,
        iram_used: iram.used,
        iram_total: iram.total,
        ..Default::default()
    }
}

/// Prefix scan of one level, then depth-first search of nested values
fn scan_generic(value: &Value) -> Option<CanonicalSizeRecord> {
    match value {
        Value::Object(object) => {
            let mut dram_sum = 0u64;
            let mut iram_sum = 0u64;
            let mut found_any = false;

            for (key, inner) in object {
                let Some(used) = inner.as_object().and_then(|o| o.get("used")) else {
                    continue;
                };
                let key = key.to_lowercase();
                if key.starts_with("dram") {
                    dram_sum = dram_sum.saturating_add(coerce_u64(used));
                    found_any = true;
                }
                if key.starts_with("iram") {
                    iram_sum = iram_sum.saturating_add(coerce_u64(used));
                    found_any = true;
                }
            }

            if found_any {
                return Some(CanonicalSizeRecord {
                    dram_used: dram_sum,
                    iram_used: iram_sum,
                    ..Default::default()
                });
            }

            object.values().find_map(parse_nested)
        }
        Value::Array(items) => items.iter().find_map(parse_nested),
        _ => None,
    }
}

fn parse_nested(value: &Value) -> Option<CanonicalSizeRecord> {
    if !(value.is_object() || value.is_array()) {
        return None;
    }
    RawReport::classify(value).parse()
}
