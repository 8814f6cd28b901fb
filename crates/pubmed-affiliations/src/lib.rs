//! PubMed Affiliations
//!
//! Finds PubMed papers with at least one author affiliated with a
//! pharmaceutical or biotech company.
//!
//! # Pipeline
//!
//! 1. **Search**: ESearch turns a query into PMIDs
//! 2. **Fetch**: EFetch returns the records, parsed from XML
//! 3. **Filter**: a keyword heuristic classifies each author's affiliation
//! 4. **Output**: CSV file or console text
//!
//! # Example
//!
//! ```no_run
//! use pubmed_affiliations::{config::Config, pipeline::{self, SearchRequest}, EntrezClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = EntrezClient::new(config)?;
//!
//!     let request = SearchRequest::new("CRISPR gene editing").with_retmax(20);
//!     let outcome = pipeline::run(&client, &request, &mut std::io::stdout()).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatters;
pub mod models;
pub mod pipeline;

pub use client::EntrezClient;
pub use config::Config;
pub use error::{ClientError, DocumentError, ExportError, PartialParse};
