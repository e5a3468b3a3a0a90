//! Ordered segment classification rules
//!
//! Rules are evaluated top to bottom against the lowercased segment name;
//! the first match decides the region. DIRAM is checked before IRAM because
//! "diram" contains "iram".

/// Memory region a layout segment contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Executable code in flash
    FlashCode,
    /// Constant/initialized data in flash
    FlashData,
    /// Data RAM (including the combined DIRAM region)
    Dram,
    /// Instruction RAM
    Iram,
}

/// One (predicate, target) classification rule
#[derive(Debug, Clone, Copy)]
pub struct SegmentRule {
    /// Short description used in logs and tests
    pub description: &'static str,
    /// Predicate over the lowercased segment name
    pub matches: fn(&str) -> bool,
    /// Region the segment is accounted to
    pub region: Region,
}

fn is_flash_code(name: &str) -> bool {
    name.contains("flash code")
}

fn is_flash_data(name: &str) -> bool {
    name.contains("flash data")
}

fn is_dram(name: &str) -> bool {
    name.contains("diram") || (name.contains("dram") && !name.contains("iram"))
}

fn is_iram(name: &str) -> bool {
    name.contains("iram")
}

/// Classification rules in precedence order
pub const SEGMENT_RULES: &[SegmentRule] = &[
    SegmentRule {
        description: "flash code",
        matches: is_flash_code,
        region: Region::FlashCode,
    },
    SegmentRule {
        description: "flash data",
        matches: is_flash_data,
        region: Region::FlashData,
    },
    SegmentRule {
        description: "diram, or dram without iram",
        matches: is_dram,
        region: Region::Dram,
    },
    SegmentRule {
        description: "iram",
        matches: is_iram,
        region: Region::Iram,
    },
];

/// Classify a layout segment by name (case-insensitive)
///
/// # Examples
///
/// ```
/// use idf_size_delta::extract::{classify_segment, Region};
///
/// assert_eq!(classify_segment("DIRAM"), Some(Region::Dram));
/// assert_eq!(classify_segment("IRAM"), Some(Region::Iram));
/// assert_eq!(classify_segment("Flash Code"), Some(Region::FlashCode));
/// assert_eq!(classify_segment("RTC SLOW"), None);
/// ```
pub fn classify_segment(name: &str) -> Option<Region> {
    let lower = name.to_lowercase();
    SEGMENT_RULES
        .iter()
        .find(|rule| (rule.matches)(&lower))
        .map(|rule| rule.region)
}
