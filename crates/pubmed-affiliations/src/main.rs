//! get-papers-list - Entry Point
//!
//! Searches PubMed and lists papers with authors from pharmaceutical or
//! biotech companies, as CSV or console text.

use std::path::PathBuf;

use clap::Parser;
use clap::builder::BoolishValueParser;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pubmed_affiliations::config::{Config, api};
use pubmed_affiliations::pipeline::{self, SearchRequest};
use pubmed_affiliations::EntrezClient;

#[derive(Parser, Debug)]
#[command(name = "get-papers-list")]
#[command(about = "Fetch research papers from PubMed and keep those with pharmaceutical or biotech authors")]
#[command(version)]
struct Cli {
    /// PubMed search query (supports PubMed's full query syntax)
    query: String,

    /// Print debug information during execution
    #[arg(short, long)]
    debug: bool,

    /// Save results to this CSV file instead of printing them
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Maximum number of papers to retrieve from PubMed
    #[arg(short, long, default_value_t = api::DEFAULT_RETMAX, allow_negative_numbers = true)]
    retmax: i64,

    /// Contact email sent to NCBI with every request
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// NCBI API key (optional, enables higher rate limits)
    #[arg(long, env = "NCBI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Accept any TLS certificate from the E-utilities host (unsafe)
    #[arg(long, env = "PUBMED_INSECURE", value_parser = BoolishValueParser::new())]
    insecure: bool,

    /// Base URL of the E-utilities service
    #[arg(long, env = "PUBMED_EUTILS_URL", hide = true, default_value = api::EUTILS_URL)]
    eutils_url: String,

    /// Log level when --debug is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

/// Diagnostics go to stderr; `--debug` sends them to stdout at debug level.
fn init_tracing(log_level: &str, debug: bool, json: bool) {
    let (filter, writer) = if debug {
        (
            EnvFilter::new("warn,pubmed_affiliations=debug,get_papers_list=debug"),
            BoxMakeWriter::new(std::io::stdout),
        )
    } else {
        (
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
            BoxMakeWriter::new(std::io::stderr),
        )
    };

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(writer)).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact().with_writer(writer)).init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.debug, cli.json_logs);

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        query = %cli.query,
        file = ?cli.file,
        retmax = cli.retmax,
        "Debug mode enabled"
    );

    let config = Config {
        eutils_url: cli.eutils_url,
        ..Config::new(cli.email, cli.api_key).with_certificate_verification(!cli.insecure)
    };
    let client = EntrezClient::new(config)?;

    let mut request = SearchRequest::new(cli.query).with_retmax(cli.retmax);
    if let Some(path) = cli.file {
        request = request.with_csv(path);
    }

    let outcome = pipeline::run(&client, &request, &mut std::io::stdout()).await?;
    tracing::debug!(?outcome, "Run finished");

    Ok(())
}
