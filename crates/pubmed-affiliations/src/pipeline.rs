//! The search → fetch → filter → output pipeline.
//!
//! Each stage catches its own failures: network and service errors are logged
//! and turn into an empty result, a malformed document yields the records read
//! before the fault, and a failed CSV write is logged. [`run`] therefore never
//! fails on those; it reports what happened through [`RunOutcome`].

use std::io::Write;
use std::path::PathBuf;

use crate::client::{EntrezClient, parse_article_set};
use crate::config::api;
use crate::filter::filter_papers;
use crate::formatters::{CsvOutcome, format_console, write_csv};
use crate::models::PaperRecord;

/// Where results go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Labelled blocks on the output stream.
    Console,
    /// A CSV file at this path.
    Csv(PathBuf),
}

/// One run's parameters.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// PubMed query, passed through verbatim.
    pub query: String,

    /// Maximum identifiers to request.
    pub retmax: i64,

    /// Output destination.
    pub output: OutputTarget,
}

impl SearchRequest {
    /// Console request with the default `retmax`.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), retmax: api::DEFAULT_RETMAX, output: OutputTarget::Console }
    }

    /// Set the maximum number of identifiers.
    #[must_use]
    pub const fn with_retmax(mut self, retmax: i64) -> Self {
        self.retmax = retmax;
        self
    }

    /// Send results to a CSV file instead of the console.
    #[must_use]
    pub fn with_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = OutputTarget::Csv(path.into());
        self
    }
}

/// How a run ended. Every variant is a normal exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// ESearch returned nothing (or failed).
    NoIdentifiers,
    /// EFetch returned no records (or failed).
    NoRecords,
    /// No paper had a company author.
    NoMatches,
    /// Records written to the console.
    Printed {
        /// Papers shown.
        papers: usize,
    },
    /// Records written to a CSV file.
    Saved {
        /// File written.
        path: PathBuf,
        /// Papers written.
        papers: usize,
    },
    /// The CSV file could not be written; the error was logged.
    ExportFailed {
        /// Target file.
        path: PathBuf,
    },
}

impl RunOutcome {
    /// User-facing message for the short-circuit outcomes.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoIdentifiers => Some("No PubMed IDs found for the given query."),
            Self::NoRecords => Some("Could not retrieve details for any papers."),
            Self::NoMatches => {
                Some("No papers found with authors from pharmaceutical or biotech companies.")
            }
            _ => None,
        }
    }
}

/// Stage 1: search PubMed for identifiers. Failures are logged and yield an empty list.
pub async fn fetch_pubmed_ids(client: &EntrezClient, query: &str, retmax: i64) -> Vec<String> {
    match client.search_ids(query, retmax).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(query, error = %e, "Error fetching PubMed IDs");
            Vec::new()
        }
    }
}

/// Stage 2: fetch and parse full records.
///
/// An empty `ids` returns immediately without a request. A malformed document
/// yields whatever was parsed before the fault.
pub async fn fetch_paper_details(client: &EntrezClient, ids: &[String]) -> Vec<PaperRecord> {
    if ids.is_empty() {
        return Vec::new();
    }

    let document = match client.fetch_document(ids).await {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(ids = ids.len(), error = %e, "Error fetching paper details");
            return Vec::new();
        }
    };

    match parse_article_set(&document) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Error parsing PubMed XML");
            e.recovered
        }
    }
}

/// Run the whole pipeline, writing user-facing text to `out`.
///
/// # Errors
///
/// Only a failure to write to `out` itself is returned.
pub async fn run<W: Write>(
    client: &EntrezClient,
    request: &SearchRequest,
    out: &mut W,
) -> std::io::Result<RunOutcome> {
    tracing::debug!(
        query = %request.query,
        output = ?request.output,
        retmax = request.retmax,
        "Starting run"
    );

    tracing::debug!(query = %request.query, "Fetching PubMed IDs");
    let ids = fetch_pubmed_ids(client, &request.query, request.retmax).await;
    if ids.is_empty() {
        return short_circuit(RunOutcome::NoIdentifiers, out);
    }
    tracing::debug!(count = ids.len(), "Fetched PubMed IDs");

    tracing::debug!(count = ids.len(), "Fetching paper details");
    let papers = fetch_paper_details(client, &ids).await;
    if papers.is_empty() {
        return short_circuit(RunOutcome::NoRecords, out);
    }
    tracing::debug!(
        count = papers.len(),
        affiliated_authors = papers.iter().map(|p| p.affiliated_authors().count()).sum::<usize>(),
        "Retrieved paper details"
    );

    tracing::debug!("Filtering papers for non-academic affiliations");
    let filtered = filter_papers(&papers);
    if filtered.is_empty() {
        return short_circuit(RunOutcome::NoMatches, out);
    }
    tracing::debug!(count = filtered.len(), "Found papers with non-academic affiliations");

    match &request.output {
        OutputTarget::Console => {
            out.write_all(format_console(&filtered).as_bytes())?;
            Ok(RunOutcome::Printed { papers: filtered.len() })
        }
        OutputTarget::Csv(path) => match write_csv(&filtered, path) {
            Ok(CsvOutcome::Written { path, rows }) => {
                writeln!(out, "Results successfully saved to {}", path.display())?;
                Ok(RunOutcome::Saved { path, papers: rows })
            }
            Ok(CsvOutcome::NoData) => {
                writeln!(out, "No data to write.")?;
                Ok(RunOutcome::NoMatches)
            }
            Err(e) => {
                tracing::error!(error = %e, "CSV export failed");
                Ok(RunOutcome::ExportFailed { path: e.path().to_path_buf() })
            }
        },
    }
}

fn short_circuit<W: Write>(outcome: RunOutcome, out: &mut W) -> std::io::Result<RunOutcome> {
    if let Some(message) = outcome.message() {
        writeln!(out, "{message}")?;
    }
    Ok(outcome)
}
