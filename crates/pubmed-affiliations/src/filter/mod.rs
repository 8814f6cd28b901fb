//! Affiliation filter.
//!
//! Keeps papers with at least one author whose affiliation classifies as a
//! company, reshaped into [`FilteredPaperRecord`]s.

mod classifier;

pub use classifier::{ACADEMIC_KEYWORDS, COMPANY_KEYWORDS, Classification, explain, is_non_academic};

use crate::models::{FilteredPaperRecord, PaperRecord};

/// Separator between author names in the output.
pub const AUTHOR_SEPARATOR: &str = ", ";

/// Separator between affiliations in the output.
pub const AFFILIATION_SEPARATOR: &str = "; ";

/// Reduce `records` to those with company authors, preserving input order.
#[must_use]
pub fn filter_papers(records: &[PaperRecord]) -> Vec<FilteredPaperRecord> {
    records.iter().filter_map(filter_paper).collect()
}

/// Reshape one record, or `None` if no author qualifies.
#[must_use]
pub fn filter_paper(record: &PaperRecord) -> Option<FilteredPaperRecord> {
    let mut names: Vec<&str> = Vec::new();
    let mut affiliations: Vec<&str> = Vec::new();

    for author in &record.authors {
        let verdict = explain(&author.affiliation);
        if !verdict.is_non_academic() {
            continue;
        }
        tracing::debug!(
            pubmed_id = %record.pubmed_id,
            author = %author.name,
            keyword = verdict.company_keyword.unwrap_or_default(),
            "Company author"
        );

        names.push(&author.name);
        if !affiliations.contains(&author.affiliation.as_str()) {
            affiliations.push(&author.affiliation);
        }
    }

    if names.is_empty() {
        return None;
    }

    Some(FilteredPaperRecord {
        pubmed_id: record.pubmed_id.clone(),
        title: record.title.clone(),
        publication_date: record.publication_date.clone(),
        non_academic_authors: names.join(AUTHOR_SEPARATOR),
        company_affiliations: affiliations.join(AFFILIATION_SEPARATOR),
        corresponding_author_email: record.corresponding_author_email.clone(),
    })
}
