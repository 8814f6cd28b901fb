//! Configuration for the NCBI E-utilities client.

/// API configuration constants.
pub mod api {
    /// Base URL for the NCBI E-utilities.
    pub const EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

    /// Database queried by every request.
    pub const DATABASE: &str = "pubmed";

    /// Tool name reported to NCBI with every request.
    pub const TOOL_NAME: &str = "get-papers-list";

    /// Contact address used when none is configured.
    ///
    /// NCBI asks every caller to identify itself; set `NCBI_EMAIL` or pass
    /// `--email` to replace this.
    pub const DEFAULT_CONTACT_EMAIL: &str = "anonymous@example.com";

    /// Default number of identifiers requested from ESearch.
    pub const DEFAULT_RETMAX: i64 = 100;

    /// Identifier lists longer than this are sent to EFetch as a POST body.
    pub const EFETCH_POST_THRESHOLD: usize = 200;
}

/// Client configuration.
///
/// Passed to [`EntrezClient::new`](crate::client::EntrezClient::new); nothing
/// here is process-global.
#[derive(Debug, Clone)]
pub struct Config {
    /// Contact address sent as the `email` parameter.
    pub contact_email: String,

    /// Tool name sent as the `tool` parameter.
    pub tool: String,

    /// NCBI API key (optional, raises the service's rate limit).
    pub api_key: Option<String>,

    /// Verify TLS certificates of the E-utilities host.
    ///
    /// Turning this off accepts any certificate, including a forged one.
    pub verify_certificates: bool,

    /// Base URL for the E-utilities (for testing with mock servers).
    pub eutils_url: String,
}

impl Config {
    /// Create a configuration with the given contact address.
    ///
    /// Certificate verification is enabled.
    #[must_use]
    pub fn new(contact_email: Option<String>, api_key: Option<String>) -> Self {
        let contact_email = contact_email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!(
                    "No contact email configured; set NCBI_EMAIL or pass --email to identify yourself to NCBI"
                );
                api::DEFAULT_CONTACT_EMAIL.to_string()
            });

        Self {
            contact_email,
            tool: api::TOOL_NAME.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            verify_certificates: true,
            eutils_url: api::EUTILS_URL.to_string(),
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            contact_email: "tests@example.com".to_string(),
            tool: api::TOOL_NAME.to_string(),
            api_key: None,
            verify_certificates: true,
            eutils_url: format!("{}/entrez/eutils", base_url.trim_end_matches('/')),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `NCBI_EMAIL`, `NCBI_API_KEY` and `PUBMED_INSECURE`.
    ///
    /// # Errors
    ///
    /// Returns error if `PUBMED_INSECURE` is set to something other than a boolean.
    pub fn from_env() -> anyhow::Result<Self> {
        let email = std::env::var("NCBI_EMAIL").ok();
        let api_key = std::env::var("NCBI_API_KEY").ok();
        let insecure = match std::env::var("PUBMED_INSECURE") {
            Ok(value) => parse_flag(&value)
                .ok_or_else(|| anyhow::anyhow!("PUBMED_INSECURE must be true or false, got {value:?}"))?,
            Err(_) => false,
        };

        Ok(Self::new(email, api_key).with_certificate_verification(!insecure))
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub fn with_certificate_verification(mut self, verify: bool) -> Self {
        self.verify_certificates = verify;
        self
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "y" | "t" | "true" | "yes" | "on" => Some(true),
        "0" | "n" | "f" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
