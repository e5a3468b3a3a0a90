//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Emoji for console output, or its plain fallback when `NO_EMOJI` is set
pub fn icon(emoji: Emoji<'_, '_>) -> String {
    if std::env::var_os("NO_EMOJI").is_some() {
        emoji.1.to_string()
    } else {
        emoji.to_string()
    }
}

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use idf_size_delta::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Insert `,` thousands separators
///
/// ```
/// use idf_size_delta::fmt::group_thousands;
///
/// assert_eq!(group_thousands(0), "0");
/// assert_eq!(group_thousands(1234567), "1,234,567");
/// ```
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Byte count with separators, e.g. `1,234 bytes`
pub fn format_byte_count(bytes: u64) -> String {
    format!("{} bytes", group_thousands(bytes))
}

/// Signed byte delta with an explicit `+` for growth, e.g. `+200 bytes`
///
/// ```
/// use idf_size_delta::fmt::format_signed_bytes;
///
/// assert_eq!(format_signed_bytes(200), "+200 bytes");
/// assert_eq!(format_signed_bytes(-1200), "-1,200 bytes");
/// assert_eq!(format_signed_bytes(0), "0 bytes");
/// ```
pub fn format_signed_bytes(delta: i64) -> String {
    let sign = match delta {
        d if d > 0 => "+",
        d if d < 0 => "-",
        _ => "",
    };
    format!("{}{}", sign, format_byte_count(delta.unsigned_abs()))
}

/// Percentage with exactly `precision` decimals and no `-0`
pub fn format_percent(value: f64, precision: usize) -> String {
    // -0.0 + 0.0 == +0.0
    format!("{:.*}", precision, value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_various_sizes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1_048_576), "1.00 MB");
        assert_eq!(format_bytes(2_621_440), "2.50 MB");
    }

    #[test]
    fn test_group_thousands_boundaries() {
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(100000), "100,000");
        assert_eq!(group_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_format_signed_bytes_extremes() {
        assert_eq!(format_signed_bytes(i64::MIN), "-9,223,372,036,854,775,808 bytes");
        assert_eq!(format_signed_bytes(1), "+1 bytes");
    }

    #[test]
    fn test_format_percent_never_prints_negative_zero() {
        assert_eq!(format_percent(-0.0, 2), "0.00");
        assert_eq!(format_percent(24.68, 2), "24.68");
        assert_eq!(format_percent(5.0, 0), "5");
    }
}
