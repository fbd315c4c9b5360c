//! PubMed E-utilities client: esearch for identifiers, esummary for
//! article details.
//!
//! Both calls are blocking request/response from the pipeline's point of
//! view; retry and backoff are out of scope here. Failures surface as
//! [`TransportError`] so the caller can report them and degrade to an
//! empty result set instead of guessing.

use serde_json::Value;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use pkscout_core::error::TransportError;
use pkscout_core::types::ArticleSummary;

const EUTILS_BASE: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const ARTICLE_BASE: &str = "https://pubmed.ncbi.nlm.nih.gov";
const USER_AGENT: &str = "pkscout/0.1 (https://github.com/pkscout/pkscout)";

/// NCBI courtesy limit is three requests per second without an API key.
const MIN_REQUEST_DELAY: Duration = Duration::from_millis(350);

/// Canonical article link for a PubMed identifier.
pub fn article_url(id: &str) -> String {
    format!("{ARTICLE_BASE}/{id}/")
}

/// Rate-limited HTTP client for the PubMed E-utilities API.
pub struct PubMedClient {
    client: reqwest::Client,
    last_request: Mutex<Option<Instant>>,
}

impl PubMedClient {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Request {
                message: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            last_request: Mutex::new(None),
        })
    }

    /// Enforce the minimum delay between E-utilities requests.
    async fn rate_limit(&self) {
        let wait_duration = {
            let last = self.last_request.lock().unwrap();
            if let Some(instant) = *last {
                let elapsed = instant.elapsed();
                if elapsed < MIN_REQUEST_DELAY {
                    Some(MIN_REQUEST_DELAY - elapsed)
                } else {
                    None
                }
            } else {
                None
            }
        }; // MutexGuard is dropped here before any .await

        if let Some(wait) = wait_duration {
            tokio::time::sleep(wait).await;
        }

        let mut last = self.last_request.lock().unwrap();
        *last = Some(Instant::now());
    }

    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        self.rate_limit().await;
        tracing::debug!("PubMed request URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                message: format!("PubMed API request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| TransportError::Decode {
            message: format!("PubMed response is not valid JSON: {e}"),
        })
    }

    /// Search PubMed and return the ordered identifier list.
    pub async fn search_ids(
        &self,
        query: &str,
        retmax: usize,
    ) -> Result<Vec<String>, TransportError> {
        let url = format!(
            "{EUTILS_BASE}/esearch.fcgi?db=pubmed&term={}&retmode=json&retmax={retmax}",
            urlencoding::encode(query),
        );
        let body = self.get_json(&url).await?;
        parse_esearch_response(&body)
    }

    /// Fetch summary details for the given identifiers, in request order.
    ///
    /// An empty identifier list returns an empty vector without touching
    /// the network.
    pub async fn fetch_summaries(
        &self,
        ids: &[String],
    ) -> Result<Vec<ArticleSummary>, TransportError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!(
            "{EUTILS_BASE}/esummary.fcgi?db=pubmed&id={}&retmode=json",
            urlencoding::encode(&ids.join(",")),
        );
        let body = self.get_json(&url).await?;
        parse_esummary_response(&body)
    }
}

// ── Response Decoding ─────────────────────────────────────────

/// Decode an esearch response body into the identifier list.
pub fn parse_esearch_response(body: &Value) -> Result<Vec<String>, TransportError> {
    let idlist = body
        .get("esearchresult")
        .and_then(|v| v.get("idlist"))
        .and_then(|v| v.as_array())
        .ok_or_else(|| TransportError::Decode {
            message: "missing esearchresult.idlist".into(),
        })?;

    Ok(idlist
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.to_string())
        .collect())
}

/// Decode an esummary response body into article summaries.
///
/// The `result` map's `"uids"` entry lists identifiers in request order
/// and is itself metadata, never an article; it drives iteration order
/// and is always excluded from the output.
pub fn parse_esummary_response(body: &Value) -> Result<Vec<ArticleSummary>, TransportError> {
    let result = body
        .get("result")
        .and_then(|v| v.as_object())
        .ok_or_else(|| TransportError::Decode {
            message: "missing result map".into(),
        })?;

    let ordered_ids: Vec<String> = match result.get("uids").and_then(|v| v.as_array()) {
        Some(uids) => uids
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.to_string())
            .collect(),
        None => result.keys().filter(|k| *k != "uids").cloned().collect(),
    };

    let mut summaries = Vec::new();
    for id in &ordered_ids {
        let Some(details) = result.get(id) else {
            continue;
        };
        let title = text_field(details, "title");
        summaries.push(ArticleSummary {
            id: id.clone(),
            title: title.clone(),
            pub_date: text_field(details, "pubdate"),
            journal: text_field(details, "source"),
            // No abstract in esummary responses; the title stands in.
            summary: title,
            link: article_url(id),
        });
    }
    Ok(summaries)
}

fn text_field(details: &Value, field: &str) -> String {
    details
        .get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("Unspecified")
        .to_string()
}

// ── Tests ─────────────────────────────────────────────────────
