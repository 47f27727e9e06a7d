use regex::Regex;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

use crate::config::WikipediaConfig;
use crate::constants::wikipedia::DISAMBIGUATION_TYPE;

#[derive(Debug, Error)]
pub enum WikipediaError {
    #[error("{endpoint} request failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
}

/// One candidate from a full-text search, in upstream relevance order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(rename = "pageid", default)]
    pub page_id: i64,
}

impl SearchHit {
    /// Snippet with the search-match markup stripped and entities decoded.
    #[must_use]
    pub fn plain_snippet(&self) -> String {
        static RE: OnceLock<Regex> = OnceLock::new();
        let stripped = get_regex(&RE, r"<[^>]*>").replace_all(&self.snippet, "");
        html_escape::decode_html_entities(&stripped).to_string()
    }
}

fn get_regex(re: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    re.get_or_init(|| Regex::new(pattern).expect("Invalid regex pattern defined in code"))
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchBlock {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub source: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSummary {
    pub title: String,
    #[serde(default)]
    pub extract: String,
    #[serde(rename = "type", default)]
    pub page_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

impl PageSummary {
    /// The summary API flags disambiguation pages through `type` for most
    /// articles, but some only say so in the short description.
    #[must_use]
    pub fn is_disambiguation(&self) -> bool {
        if self.page_type.as_deref() == Some(DISAMBIGUATION_TYPE) {
            return true;
        }

        self.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(DISAMBIGUATION_TYPE))
    }

    #[must_use]
    pub fn thumbnail_source(&self) -> Option<&str> {
        self.thumbnail.as_ref().map(|t| t.source.as_str())
    }
}

#[derive(Clone)]
pub struct WikipediaClient {
    client: Client,
    search_endpoint: String,
    summary_endpoint: String,
}

impl WikipediaClient {
    #[must_use]
    pub fn new(client: Client, config: &WikipediaConfig) -> Self {
        Self {
            client,
            search_endpoint: config.search_endpoint.clone(),
            summary_endpoint: config.summary_endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &WikipediaConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build Wikipedia HTTP client: {e}"))?;

        Ok(Self::new(client, config))
    }

    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}?action=query&list=search&srsearch={}&format=json&origin=*",
            self.search_endpoint,
            urlencoding::encode(query)
        )
    }

    #[must_use]
    pub fn summary_url(&self, title: &str) -> String {
        format!("{}/{}", self.summary_endpoint, urlencoding::encode(title))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, WikipediaError> {
        const ENDPOINT: &str = "search";

        let url = self.search_url(query);
        debug!(query = %query, "Searching Wikipedia");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| request_failed(ENDPOINT, source))?;

        if !response.status().is_success() {
            record(ENDPOINT, "http_error");
            return Err(WikipediaError::Status {
                endpoint: ENDPOINT,
                status: response.status().as_u16(),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|source| request_failed(ENDPOINT, source))?;

        record(ENDPOINT, "success");
        Ok(body.query.map(|q| q.search).unwrap_or_default())
    }

    pub async fn summary(&self, title: &str) -> Result<PageSummary, WikipediaError> {
        const ENDPOINT: &str = "summary";

        let url = self.summary_url(title);
        debug!(title = %title, "Fetching Wikipedia page summary");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| request_failed(ENDPOINT, source))?;

        if !response.status().is_success() {
            record(ENDPOINT, "http_error");
            return Err(WikipediaError::Status {
                endpoint: ENDPOINT,
                status: response.status().as_u16(),
            });
        }

        let summary: PageSummary = response
            .json()
            .await
            .map_err(|source| request_failed(ENDPOINT, source))?;

        record(ENDPOINT, "success");
        Ok(summary)
    }

    /// HEAD request returning the `Content-Type` header, if any.
    pub async fn content_type(&self, url: &str) -> Result<Option<String>, WikipediaError> {
        const ENDPOINT: &str = "image_probe";

        debug!(url = %url, "Probing image content type");

        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|source| request_failed(ENDPOINT, source))?;

        record(ENDPOINT, "success");

        Ok(response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string))
    }
}

fn request_failed(endpoint: &'static str, source: reqwest::Error) -> WikipediaError {
    record(endpoint, "transport_error");
    WikipediaError::Request { endpoint, source }
}

fn record(endpoint: &'static str, outcome: &'static str) {
    metrics::counter!(
        "wikipedia_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}
