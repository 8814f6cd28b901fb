//! ESearch JSON response (`retmode=json`).

use serde::Deserialize;

/// Top-level ESearch body.
#[derive(Debug, Clone, Deserialize)]
pub struct ESearchResponse {
    /// The result block. Absent on some service errors.
    #[serde(default)]
    pub esearchresult: Option<ESearchResult>,

    /// Top-level error message (e.g. invalid API key).
    #[serde(default)]
    pub error: Option<String>,
}

/// Result block of an ESearch response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ESearchResult {
    /// Total number of matches, as a decimal string.
    #[serde(default)]
    pub count: Option<String>,

    /// Matching PMIDs, in relevance order.
    #[serde(default)]
    pub idlist: Vec<String>,

    /// Query error reported inside the result block.
    #[serde(rename = "ERROR", default)]
    pub error: Option<String>,

    /// How PubMed interpreted the query.
    #[serde(default)]
    pub querytranslation: Option<String>,
}

impl ESearchResponse {
    /// The first error reported anywhere in the body.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.esearchresult.as_ref()?.error.as_deref())
            .filter(|m| !m.is_empty())
    }

    /// Consume the response, yielding the identifier list.
    #[must_use]
    pub fn into_ids(self) -> Vec<String> {
        self.esearchresult.map(|r| r.idlist).unwrap_or_default()
    }
}
