//! Wikipedia-backed implementation of the resolver stages.

use crate::clients::wikipedia::{PageSummary, SearchHit, WikipediaClient, WikipediaError};
use crate::constants::wikipedia::QUALIFIERS;
use crate::services::rate_gate::RateGate;
use crate::services::resolver_service::{
    ContentFetcher, ContentSource, ResolvedContent, ResolverError, TitleResolver,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[async_trait::async_trait]
impl ContentSource for WikipediaClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, WikipediaError> {
        Self::search(self, query).await
    }

    async fn summary(&self, title: &str) -> Result<PageSummary, WikipediaError> {
        Self::summary(self, title).await
    }

    async fn content_type(&self, url: &str) -> Result<Option<String>, WikipediaError> {
        Self::content_type(self, url).await
    }
}

/// Resolver that gates every search and summary call through a shared
/// [`RateGate`]. Image probes go to the media host and are not gated.
pub struct WikipediaResolver {
    source: Arc<dyn ContentSource>,
    gate: Arc<RateGate>,
    qualifiers: Vec<String>,
}

impl WikipediaResolver {
    #[must_use]
    pub fn new(
        source: Arc<dyn ContentSource>,
        gate: Arc<RateGate>,
        qualifiers: Vec<String>,
    ) -> Self {
        Self {
            source,
            gate,
            qualifiers,
        }
    }

    #[must_use]
    pub fn with_default_qualifiers(source: Arc<dyn ContentSource>, gate: Arc<RateGate>) -> Self {
        let qualifiers = QUALIFIERS.iter().map(ToString::to_string).collect();
        Self::new(source, gate, qualifiers)
    }

    #[must_use]
    pub fn qualifiers(&self) -> &[String] {
        &self.qualifiers
    }

    async fn gated_search(&self, query: &str) -> Result<Vec<SearchHit>, WikipediaError> {
        self.gate.acquire().await;
        self.source.search(query).await
    }

    async fn gated_summary(&self, title: &str) -> Result<PageSummary, WikipediaError> {
        self.gate.acquire().await;
        self.source.summary(title).await
    }

    /// A summary that cannot be fetched counts as substantive so that a
    /// transient failure does not reject an otherwise good title.
    pub async fn is_disambiguation(&self, title: &str) -> bool {
        match self.gated_summary(title).await {
            Ok(summary) => summary.is_disambiguation(),
            Err(e) => {
                warn!(title = %title, error = %e, "Disambiguation check failed, treating as article");
                false
            }
        }
    }

    /// Best-effort probe: any failure means "not an image".
    pub async fn is_image(&self, url: &str) -> bool {
        match self.source.content_type(url).await {
            Ok(Some(content_type)) => content_type.starts_with("image/"),
            Ok(None) => false,
            Err(e) => {
                warn!(url = %url, error = %e, "Image probe failed");
                false
            }
        }
    }

    async fn first_substantive(&self, hits: &[SearchHit]) -> Option<String> {
        for hit in hits {
            if !self.is_disambiguation(&hit.title).await {
                return Some(hit.title.clone());
            }
            debug!(title = %hit.title, "Skipping disambiguation page");
        }
        None
    }

    async fn resolve_with_qualifiers(&self, query: &str) -> Option<String> {
        for qualifier in &self.qualifiers {
            let qualified = format!("{query} {qualifier}");

            let hits = match self.gated_search(&qualified).await {
                Ok(hits) => hits,
                Err(e) => {
                    debug!(query = %qualified, error = %e, "Qualified search failed, skipping");
                    continue;
                }
            };

            let Some(first) = hits.first() else {
                continue;
            };

            if !self.is_disambiguation(&first.title).await {
                return Some(first.title.clone());
            }
        }
        None
    }
}

#[async_trait::async_trait]
impl TitleResolver for WikipediaResolver {
    async fn resolve_title(&self, query: &str) -> Result<String, ResolverError> {
        let hits = self
            .gated_search(query)
            .await
            .map_err(|e| ResolverError::Search(e.to_string()))?;

        if hits.is_empty() {
            return Err(ResolverError::no_results(query));
        }

        if let Some(title) = self.first_substantive(&hits).await {
            info!(query = %query, title = %title, "Resolved article title");
            return Ok(title);
        }

        debug!(query = %query, "All results were disambiguation pages, trying qualifiers");

        if let Some(title) = self.resolve_with_qualifiers(query).await {
            info!(query = %query, title = %title, "Resolved article title with qualifier");
            return Ok(title);
        }

        Err(ResolverError::too_ambiguous(query))
    }
}

#[async_trait::async_trait]
impl ContentFetcher for WikipediaResolver {
    async fn fetch_content(&self, title: &str) -> Result<ResolvedContent, ResolverError> {
        let summary = self
            .gated_summary(title)
            .await
            .map_err(|e| ResolverError::Fetch(e.to_string()))?;

        let image = match summary.thumbnail_source() {
            Some(url) => {
                if !self.is_image(url).await {
                    return Err(ResolverError::InvalidImage {
                        url: url.to_string(),
                    });
                }
                Some(url.to_string())
            }
            None => None,
        };

        Ok(ResolvedContent {
            description: summary.extract,
            image,
        })
    }
}
