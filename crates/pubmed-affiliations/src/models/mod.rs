//! Data models for PubMed records.
//!
//! `PaperRecord` is what EFetch yields, `FilteredPaperRecord` is what the
//! affiliation filter keeps, and `ESearchResponse` is the JSON body of an
//! ESearch call.

mod filtered;
mod paper;
mod search;

pub use filtered::{CSV_COLUMNS, FilteredPaperRecord};
pub use paper::{AuthorInfo, PaperRecord};
pub use search::{ESearchResponse, ESearchResult};

/// Placeholder for a field that is absent from the source document.
pub const NOT_AVAILABLE: &str = "N/A";
