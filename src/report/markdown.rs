//! Markdown rendering of a delta report for PR comments

use super::{CanonicalSizeRecord, DeltaReport, ReportConfig};

const TABLE_HEADER: &str = "| Metric | Base | PR | Delta |";
const TABLE_ALIGNMENT: &str = "|---|---:|---:|---:|";
const CAPTION: &str = "<sub>FLASH uses the json2 flash sum or the app .bin size. \
RAM sums DRAM+IRAM. Percentages shown when totals are available.</sub>";

/// Hidden marker a CI integration uses to find and replace an earlier comment
///
/// ```
/// use idf_size_delta::report::comment_marker;
///
/// assert_eq!(comment_marker("blink"), "<!-- size-delta:blink -->");
/// ```
pub fn comment_marker(app_name: &str) -> String {
    format!("<!-- size-delta:{} -->", app_name)
}

/// Render the base vs PR comparison as Markdown
///
/// Identical inputs always produce identical output.
pub fn render(
    app_name: &str,
    base: &CanonicalSizeRecord,
    head: &CanonicalSizeRecord,
    config: &ReportConfig,
) -> String {
    DeltaReport::compute(app_name, base, head, config).to_markdown()
}

impl DeltaReport {
    /// Render as a Markdown document ending with the comment marker
    pub fn to_markdown(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 8);
        lines.push(format!("### ESP-IDF Size Report for '{}'", self.app_name));
        lines.push(String::new());
        lines.push(TABLE_HEADER.to_string());
        lines.push(TABLE_ALIGNMENT.to_string());
        for row in &self.rows {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                row.metric.label(),
                row.base_cell(self.precision),
                row.head_cell(self.precision),
                row.delta_cell(self.precision)
            ));
        }
        lines.push(String::new());
        lines.push(CAPTION.to_string());
        lines.push(String::new());
        lines.push(comment_marker(&self.app_name));
        lines.join("\n")
    }
}
