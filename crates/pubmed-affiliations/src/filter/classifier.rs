//! Keyword heuristic deciding whether an affiliation is a company.
//!
//! Matching is case-insensitive substring search, so short keywords such as
//! `ag` or `rd` fire inside longer words. That is part of the heuristic and is
//! kept as-is; so is the rule that any academic keyword anywhere in the string
//! vetoes every company keyword.

/// Terms indicating a for-profit organisation.
pub const COMPANY_KEYWORDS: &[&str] = &[
    "pharmaceutical",
    "pharma",
    "biotech",
    "biotechnology",
    "inc.",
    "llc",
    "corp",
    "corporation",
    "company",
    "gmbh",
    "ag",
    "laboratories",
    "labs",
    "medicines",
    "drug development",
    "research and development",
    "rd",
    "bio-",
    "diagnostics",
    "therapeutics",
    "novartis",
    "pfizer",
    "roche",
    "merck",
    "janssen",
    "amgen",
    "genentech",
    "gilead",
    "astrazeneca",
    "sanofi",
    "eli lilly",
    "bayer",
    "glaxosmithkline",
    "abbvie",
];

/// Terms indicating an academic, clinical or governmental institution.
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "hospital",
    "clinic",
    "school",
    "department",
    "center for disease control",
    "cdc",
    "nih",
    "fda",
    "national institutes of health",
    "medical school",
    "academia",
    "government",
    "public health",
    "foundation",
    "research center",
    "academy",
];

/// Returns true when `affiliation` reads as a pharmaceutical or biotech company.
///
/// True iff at least one company keyword occurs and no academic keyword
/// occurs. An empty affiliation is never a company.
#[must_use]
pub fn is_non_academic(affiliation: &str) -> bool {
    let lower = affiliation.to_lowercase();

    matched_keyword(&lower, COMPANY_KEYWORDS).is_some()
        && matched_keyword(&lower, ACADEMIC_KEYWORDS).is_none()
}

/// Explain a classification: the first company and academic keywords found.
#[must_use]
pub fn explain(affiliation: &str) -> Classification {
    let lower = affiliation.to_lowercase();
    Classification {
        company_keyword: matched_keyword(&lower, COMPANY_KEYWORDS),
        academic_keyword: matched_keyword(&lower, ACADEMIC_KEYWORDS),
    }
}

/// Keywords behind one classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// First company keyword in list order, if any.
    pub company_keyword: Option<&'static str>,

    /// First academic keyword in list order, if any.
    pub academic_keyword: Option<&'static str>,
}

impl Classification {
    /// Same verdict as [`is_non_academic`].
    #[must_use]
    pub const fn is_non_academic(&self) -> bool {
        self.company_keyword.is_some() && self.academic_keyword.is_none()
    }
}

fn matched_keyword(lower: &str, keywords: &[&'static str]) -> Option<&'static str> {
    keywords.iter().copied().find(|k| lower.contains(k))
}
