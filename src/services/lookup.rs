use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::services::resolver_service::{ContentFetcher, ResolverError, TitleResolver};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

/// Autofill for a new species entry: resolve the name, then fetch content.
pub struct SpeciesLookupService {
    resolver: Arc<dyn TitleResolver>,
    fetcher: Arc<dyn ContentFetcher>,
}

impl SpeciesLookupService {
    #[must_use]
    pub fn new(resolver: Arc<dyn TitleResolver>, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { resolver, fetcher }
    }

    pub async fn resolve_title(&self, query: &str) -> Result<String, ResolverError> {
        self.resolver.resolve_title(query).await
    }

    pub async fn fetch_content(&self, title: &str) -> Result<LookupResult, ResolverError> {
        let content = self.fetcher.fetch_content(title).await?;
        Ok(LookupResult {
            title: title.to_string(),
            description: content.description,
            image: content.image,
        })
    }

    pub async fn lookup(&self, query: &str) -> Result<LookupResult, ResolverError> {
        let title = self.resolver.resolve_title(query).await?;
        let result = self.fetch_content(&title).await?;

        info!(
            query = %query,
            title = %result.title,
            has_image = result.image.is_some(),
            "Species lookup complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::resolver_service::ResolvedContent;
    use std::sync::Mutex;

    struct FixedResolver(Result<&'static str, &'static str>);

    #[async_trait::async_trait]
    impl TitleResolver for FixedResolver {
        async fn resolve_title(&self, query: &str) -> Result<String, ResolverError> {
            match self.0 {
                Ok(title) => Ok(title.to_string()),
                Err(_) => Err(ResolverError::no_results(query)),
            }
        }
    }

    #[derive(Default)]
    struct RecordingFetcher {
        requested: Mutex<Vec<String>>,
        invalid_image: bool,
    }

    #[async_trait::async_trait]
    impl ContentFetcher for RecordingFetcher {
        async fn fetch_content(&self, title: &str) -> Result<ResolvedContent, ResolverError> {
            self.requested.lock().unwrap().push(title.to_string());
            if self.invalid_image {
                return Err(ResolverError::InvalidImage {
                    url: "https://example.org/page".to_string(),
                });
            }
            Ok(ResolvedContent {
                description: format!("About {title}"),
                image: Some(format!("https://example.org/{title}.jpg")),
            })
        }
    }

    #[tokio::test]
    async fn lookup_fetches_resolved_title() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let service = SpeciesLookupService::new(Arc::new(FixedResolver(Ok("Lion"))), fetcher.clone());

        let result = service.lookup("Panthera leo").await.unwrap();
        assert_eq!(
            result,
            LookupResult {
                title: "Lion".to_string(),
                description: "About Lion".to_string(),
                image: Some("https://example.org/Lion.jpg".to_string()),
            }
        );
        assert_eq!(*fetcher.requested.lock().unwrap(), vec!["Lion"]);
    }

    #[tokio::test]
    async fn resolution_failure_skips_fetch() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let service = SpeciesLookupService::new(Arc::new(FixedResolver(Err("none"))), fetcher.clone());

        let err = service.lookup("xyzzy").await.unwrap_err();
        assert!(matches!(err, ResolverError::NotFound(_)));
        assert!(fetcher.requested.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_errors_propagate_unchanged() {
        let fetcher = Arc::new(RecordingFetcher {
            invalid_image: true,
            ..RecordingFetcher::default()
        });
        let service = SpeciesLookupService::new(Arc::new(FixedResolver(Ok("Lion"))), fetcher);

        let err = service.lookup("Panthera leo").await.unwrap_err();
        assert!(matches!(err, ResolverError::InvalidImage { .. }));
    }
}
