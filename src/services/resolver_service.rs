//! Domain service for resolving a free-text species name into Wikipedia content.
//!
//! Resolution runs as a pipeline of independently replaceable stages:
//! [`ContentSource`] performs the raw upstream calls, [`TitleResolver`] turns a
//! query into a substantive article title, and [`ContentFetcher`] turns a title
//! into a description and a verified image reference.

use crate::clients::wikipedia::{PageSummary, SearchHit, WikipediaError};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the resolver stages.
///
/// None of these are retried or converted to defaults inside the pipeline.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Search failed: {0}")]
    Search(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to fetch article content: {0}")]
    Fetch(String),

    #[error("Invalid or unsupported image format: {url}")]
    InvalidImage { url: String },
}

impl ResolverError {
    pub fn no_results(query: &str) -> Self {
        Self::NotFound(format!("No matching Wikipedia article found for '{query}'"))
    }

    pub fn too_ambiguous(query: &str) -> Self {
        Self::NotFound(format!(
            "Could not find a specific article for '{query}'. Try adding more specific terms to your search."
        ))
    }
}

/// Description and image for a resolved article.
///
/// `image` is only ever set after the URL was confirmed to serve `image/*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedContent {
    pub description: String,
    pub image: Option<String>,
}

/// Raw calls against the content service.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Full-text search; hits are returned in upstream relevance order.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, WikipediaError>;

    async fn summary(&self, title: &str) -> Result<PageSummary, WikipediaError>;

    /// Metadata-only probe returning the `Content-Type` header of `url`.
    async fn content_type(&self, url: &str) -> Result<Option<String>, WikipediaError>;
}

#[async_trait::async_trait]
pub trait TitleResolver: Send + Sync {
    /// Resolves a query to the first non-disambiguation article title.
    ///
    /// # Errors
    ///
    /// - Returns [`ResolverError::Search`] if the primary search call fails
    /// - Returns [`ResolverError::NotFound`] if no usable article exists
    async fn resolve_title(&self, query: &str) -> Result<String, ResolverError>;
}

#[async_trait::async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetches the summary extract and verified thumbnail for `title`.
    ///
    /// # Errors
    ///
    /// - Returns [`ResolverError::Fetch`] if the summary request fails
    /// - Returns [`ResolverError::InvalidImage`] if the thumbnail is not an image
    async fn fetch_content(&self, title: &str) -> Result<ResolvedContent, ResolverError>;
}
