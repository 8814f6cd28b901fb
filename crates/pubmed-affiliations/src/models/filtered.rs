//! Reduced record shape kept by the affiliation filter.

use serde::{Deserialize, Serialize};

/// CSV header, in column order.
pub const CSV_COLUMNS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// A paper with at least one author from a company.
///
/// Field order and serde names define the CSV schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredPaperRecord {
    /// PubMed identifier.
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,

    /// Article title.
    #[serde(rename = "Title")]
    pub title: String,

    /// Publication date as found on the source record.
    #[serde(rename = "Publication Date")]
    pub publication_date: String,

    /// Company authors, joined with `", "`.
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,

    /// Distinct company affiliations in first-seen order, joined with `"; "`.
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,

    /// Copied from the source record (`N/A`).
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_author_email: String,
}

impl FilteredPaperRecord {
    /// Field values in [`CSV_COLUMNS`] order.
    #[must_use]
    pub fn fields(&self) -> [&str; 6] {
        [
            self.pubmed_id.as_str(),
            self.title.as_str(),
            self.publication_date.as_str(),
            self.non_academic_authors.as_str(),
            self.company_affiliations.as_str(),
            self.corresponding_author_email.as_str(),
        ]
    }
}
