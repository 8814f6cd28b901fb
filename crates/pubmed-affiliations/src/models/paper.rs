//! Paper and author records parsed from EFetch XML.

use serde::Serialize;

use super::NOT_AVAILABLE;

/// One PubMed article as parsed from an EFetch document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaperRecord {
    /// PubMed identifier (PMID), or `N/A`.
    pub pubmed_id: String,

    /// Article title, or `N/A`.
    pub title: String,

    /// `Year-Month-Day` with absent parts left out, or `N/A`.
    ///
    /// Raw text from the document; no date normalisation is applied.
    pub publication_date: String,

    /// Authors in document order.
    pub authors: Vec<AuthorInfo>,

    /// Always `N/A`: PubMed XML has no structured corresponding-author
    /// address and none is extracted.
    pub corresponding_author_email: String,
}

impl PaperRecord {
    /// Build a record, substituting `N/A` for a blank identifier or title.
    #[must_use]
    pub fn new(
        pubmed_id: Option<String>,
        title: Option<String>,
        date_parts: &[Option<String>],
        authors: Vec<AuthorInfo>,
    ) -> Self {
        Self {
            pubmed_id: or_sentinel(pubmed_id),
            title: or_sentinel(title),
            publication_date: join_date(date_parts),
            authors,
            corresponding_author_email: NOT_AVAILABLE.to_string(),
        }
    }

    /// Authors whose affiliation is non-empty.
    pub fn affiliated_authors(&self) -> impl Iterator<Item = &AuthorInfo> {
        self.authors.iter().filter(|a| !a.affiliation.is_empty())
    }
}

/// One author of a paper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorInfo {
    /// `ForeName LastName`, trimmed. Empty for collective authors.
    pub name: String,

    /// First affiliation listed for this author, empty if none.
    pub affiliation: String,
}

impl AuthorInfo {
    /// Build an author from the name parts found in the document.
    ///
    /// Missing parts become empty strings; only the assembled name is trimmed.
    #[must_use]
    pub fn new(fore_name: Option<&str>, last_name: Option<&str>, affiliation: Option<String>) -> Self {
        let name = format!("{} {}", fore_name.unwrap_or(""), last_name.unwrap_or(""));
        Self { name: name.trim().to_string(), affiliation: affiliation.unwrap_or_default() }
    }
}

fn or_sentinel(value: Option<String>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Join the present `[year, month, day]` parts with `-`.
fn join_date(parts: &[Option<String>]) -> String {
    let present: Vec<&str> =
        parts.iter().flatten().map(String::as_str).filter(|p| !p.is_empty()).collect();

    if present.is_empty() { NOT_AVAILABLE.to_string() } else { present.join("-") }
}
