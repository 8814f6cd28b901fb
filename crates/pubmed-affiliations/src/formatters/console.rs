//! Plain-text console output.

use crate::models::{CSV_COLUMNS, FilteredPaperRecord};

/// Width of the dashed line after each record.
pub const SEPARATOR_WIDTH: usize = 50;

/// Message printed instead of records when there are none.
const NO_RESULTS: &str = "No papers found with non-academic affiliations.";

/// Format records as labelled blocks, one `Label: value` line per column.
#[must_use]
pub fn format_console(records: &[FilteredPaperRecord]) -> String {
    if records.is_empty() {
        return format!("{NO_RESULTS}\n");
    }

    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut output = String::new();

    for record in records {
        for (label, value) in CSV_COLUMNS.iter().zip(record.fields()) {
            output.push_str(&format!("{label}: {value}\n"));
        }
        output.push_str(&separator);
        output.push('\n');
    }

    output
}
