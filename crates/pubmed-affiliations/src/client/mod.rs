//! NCBI E-utilities client.
//!
//! Two calls are made per run:
//! - ESearch (`esearch.fcgi`, JSON) turns a query into PMIDs
//! - EFetch (`efetch.fcgi`, XML) returns the full records for those PMIDs
//!
//! Requests are sent once. There is no retry, caching or rate limiting, and
//! no timeout beyond what the transport applies by default.

pub mod efetch;

use reqwest::Client;
use url::Url;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::ESearchResponse;

pub use efetch::parse_article_set;

/// PubMed client for the ESearch and EFetch endpoints.
#[derive(Clone)]
pub struct EntrezClient {
    /// HTTP client.
    client: Client,

    /// `esearch.fcgi` URL.
    esearch_url: Url,

    /// `efetch.fcgi` URL.
    efetch_url: Url,

    /// Contact address sent with every request.
    contact_email: String,

    /// Tool name sent with every request.
    tool: String,

    /// API key (optional).
    api_key: Option<String>,

    /// Whether TLS certificates are checked.
    verify_certificates: bool,
}

impl EntrezClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: Config) -> ClientResult<Self> {
        if !config.verify_certificates {
            tracing::warn!(
                url = %config.eutils_url,
                "TLS certificate verification is disabled; responses could be forged"
            );
        }

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(!config.verify_certificates)
            .gzip(true)
            .build()?;

        let base = Url::parse(&format!("{}/", config.eutils_url.trim_end_matches('/')))?;

        Ok(Self {
            client,
            esearch_url: base.join("esearch.fcgi")?,
            efetch_url: base.join("efetch.fcgi")?,
            contact_email: config.contact_email,
            tool: config.tool,
            api_key: config.api_key,
            verify_certificates: config.verify_certificates,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Contact address sent with every request.
    #[must_use]
    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    /// Whether TLS certificates are checked.
    #[must_use]
    pub const fn verifies_certificates(&self) -> bool {
        self.verify_certificates
    }

    /// Search PubMed and return matching PMIDs in the service's order.
    ///
    /// `retmax` is passed through unchecked; the service decides what zero,
    /// negative or very large values mean.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-success status, an
    /// unparseable body, or an error reported by ESearch itself.
    pub async fn search_ids(&self, query: &str, retmax: i64) -> ClientResult<Vec<String>> {
        let mut params = self.common_params();
        params.push(("term", query.to_string()));
        params.push(("retmax", retmax.to_string()));
        params.push(("retmode", "json".to_string()));

        let response = self.client.get(with_query(&self.esearch_url, &params)).send().await?;
        let body = handle_response(response).await?.text().await?;
        let parsed: ESearchResponse = serde_json::from_str(&body)?;

        if let Some(message) = parsed.error_message() {
            return Err(ClientError::search(message));
        }

        if let Some(result) = &parsed.esearchresult {
            tracing::debug!(
                count = result.count.as_deref().unwrap_or("?"),
                returned = result.idlist.len(),
                translation = result.querytranslation.as_deref().unwrap_or(""),
                "ESearch completed"
            );
        }

        Ok(parsed.into_ids())
    }

    /// Fetch the EFetch XML document for the given PMIDs.
    ///
    /// Long identifier lists go in a form-encoded POST body rather than the URL.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-success status.
    pub async fn fetch_document(&self, ids: &[String]) -> ClientResult<String> {
        let mut params = self.common_params();
        params.push(("id", ids.join(",")));
        params.push(("retmode", "xml".to_string()));

        let request = if ids.len() > api::EFETCH_POST_THRESHOLD {
            let body = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&params)
                .finish();
            self.client
                .post(self.efetch_url.clone())
                .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body)
        } else {
            self.client.get(with_query(&self.efetch_url, &params))
        };

        let response = handle_response(request.send().await?).await?;
        Ok(response.text().await?)
    }

    /// Parameters every E-utilities request carries.
    fn common_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", api::DATABASE.to_string()),
            ("tool", self.tool.clone()),
            ("email", self.contact_email.clone()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }
}

/// Append query parameters to a URL.
fn with_query(base: &Url, params: &[(&str, String)]) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().extend_pairs(params);
    url
}

/// Map non-success statuses to client errors.
async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(1);

            Err(ClientError::rate_limited(retry_after))
        }
        400 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::bad_request(text))
        }
        500..=599 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::server(status.as_u16(), text))
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
        }
    }
}

impl std::fmt::Debug for EntrezClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntrezClient")
            .field("contact_email", &self.contact_email)
            .field("has_api_key", &self.has_api_key())
            .field("verify_certificates", &self.verify_certificates)
            .finish()
    }
}
