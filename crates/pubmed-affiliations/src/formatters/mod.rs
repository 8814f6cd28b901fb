//! Output formatters for CSV files and console text.

mod console;
mod csv_file;

pub use console::{SEPARATOR_WIDTH, format_console};
pub use csv_file::{CsvOutcome, write_csv, write_csv_to};
