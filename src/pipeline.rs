use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::data_models::{SearchQuery, SearchResult};
use crate::error::SearchError;
use crate::extractor::{Degradation, UrlExtractor};
use crate::providers::{self, BoxedSearchProvider, generate_mock};

/// Things worth knowing about a resolution that never surface as errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    UrlExtracted { url: String },
    UrlExtractionDegraded { url: String, reason: Degradation },
    ProviderSucceeded { provider: &'static str, results: usize },
    ProviderFailed { provider: &'static str, error: String },
    ProviderNotConfigured { missing: Vec<&'static str> },
    MockFallback { query: String, results: usize },
}

pub trait SearchObserver: Send + Sync {
    fn on_event(&self, event: &SearchEvent);
}

/// Default observer, writes every event to the log.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_event(&self, event: &SearchEvent) {
        match event {
            SearchEvent::UrlExtracted { url } => tracing::info!(%url, "extracted product info"),
            SearchEvent::UrlExtractionDegraded { url, reason } => {
                tracing::warn!(%url, ?reason, "product extraction degraded")
            }
            SearchEvent::ProviderSucceeded { provider, results } => {
                tracing::info!(provider, results, "provider search complete")
            }
            SearchEvent::ProviderFailed { provider, error } => {
                tracing::error!(provider, %error, "provider search failed, falling back to mock data")
            }
            SearchEvent::ProviderNotConfigured { missing } => tracing::warn!(
                missing = %missing.join(", "),
                "no search provider credentials configured, using mock data"
            ),
            SearchEvent::MockFallback { query, results } => {
                tracing::info!(%query, results, "served mock results")
            }
        }
    }
}

/// Turns a text and/or product url into a search string, runs it against the configured
/// provider and falls back to mock data when there is none or it fails.
pub struct SearchPipeline {
    extractor: UrlExtractor,
    provider: Option<BoxedSearchProvider>,
    missing_credentials: Vec<&'static str>,
    observer: Arc<dyn SearchObserver>,
}

impl SearchPipeline {
    pub fn new(config: &Config) -> Result<SearchPipeline> {
        let provider = config
            .provider
            .backend()
            .map(|backend| providers::from_backend(backend, config.provider_timeout))
            .transpose()?;

        Ok(SearchPipeline {
            extractor: UrlExtractor::new(config.extract_timeout)?,
            provider,
            missing_credentials: config.provider.missing(),
            observer: Arc::new(TracingObserver),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn SearchObserver>) -> SearchPipeline {
        self.observer = observer;
        self
    }

    pub fn with_provider(mut self, provider: BoxedSearchProvider) -> SearchPipeline {
        self.provider = Some(provider);
        self
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// Rejects queries with neither text nor url.
    pub fn validate(query: &SearchQuery) -> Result<(), SearchError> {
        if query.is_empty() {
            return Err(SearchError::InvalidInput(
                "Please provide a search query (q) or product URL (url)".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates, then resolves on its own task. A panic there comes back as
    /// [`SearchError::Internal`].
    pub async fn search(
        self: Arc<Self>,
        query: SearchQuery,
    ) -> Result<Vec<SearchResult>, SearchError> {
        Self::validate(&query)?;
        let handle = tokio::spawn(async move { self.resolve(&query).await });
        handle
            .await
            .map_err(|e| SearchError::Internal(anyhow::anyhow!("search task failed: {e}")))
    }

    /// Search string for `query`: extracted brand and name from the url (if any) followed
    /// by the text.
    pub async fn search_text(&self, query: &SearchQuery) -> String {
        let text = query.text.clone().unwrap_or_default();
        let Some(url) = query.url.as_deref() else {
            return text;
        };

        let extraction = self.extractor.extract_with_outcome(url).await;
        match extraction.degradation {
            Some(reason) => self.observer.on_event(&SearchEvent::UrlExtractionDegraded {
                url: url.to_string(),
                reason,
            }),
            None => self.observer.on_event(&SearchEvent::UrlExtracted {
                url: url.to_string(),
            }),
        }

        let mut parts: Vec<&str> = extraction.info.search_terms().collect();
        if !text.is_empty() {
            parts.push(&text);
        }
        parts.join(" ")
    }

    pub async fn resolve(&self, query: &SearchQuery) -> Vec<SearchResult> {
        let search_text = self.search_text(query).await;
        if search_text.trim().is_empty() {
            return Vec::new();
        }

        let Some(provider) = self.provider.as_ref() else {
            self.observer.on_event(&SearchEvent::ProviderNotConfigured {
                missing: self.missing_credentials.clone(),
            });
            return self.mock(&search_text);
        };

        match provider.search(&search_text).await {
            Ok(results) => {
                self.observer.on_event(&SearchEvent::ProviderSucceeded {
                    provider: provider.name(),
                    results: results.len(),
                });
                results
            }
            Err(e) => {
                self.observer.on_event(&SearchEvent::ProviderFailed {
                    provider: provider.name(),
                    error: e.to_string(),
                });
                self.mock(&search_text)
            }
        }
    }

    fn mock(&self, search_text: &str) -> Vec<SearchResult> {
        let results = generate_mock(search_text);
        self.observer.on_event(&SearchEvent::MockFallback {
            query: search_text.to_string(),
            results: results.len(),
        });
        results
    }
}
