//! Fuzzing library for pubmed-affiliations.
//!
//! Targets cover the parsers that see untrusted service output: the EFetch
//! XML reader, the ESearch JSON envelope and the affiliation classifier.
//!
//! # Usage
//!
//! ```bash
//! cd crates/pubmed-fuzz
//! cargo +nightly fuzz run fuzz_efetch_parse -- -max_total_time=60
//! ```

pub use pubmed_affiliations::client::parse_article_set;
pub use pubmed_affiliations::filter::is_non_academic;
pub use pubmed_affiliations::models;
