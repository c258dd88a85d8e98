use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::ProviderBackend;
use crate::data_models::SearchResult;
use crate::error::ProviderError;

pub mod custom_search;
pub mod extract;
pub mod mock;
pub mod vertex;

pub use custom_search::CustomSearch;
pub use extract::{Pagemap, RawProviderItem};
pub use mock::generate_mock;
pub use vertex::VertexSearch;

/// Maximum number of items requested from a provider per search.
pub const RESULT_LIMIT: usize = 10;

/// An upstream search backend. Implementations normalize their own response shape into
/// [`SearchResult`]s and drop anything not hosted on a known platform.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ProviderError>;
}

pub type BoxedSearchProvider = Box<dyn SearchProvider + Send + Sync>;

/// Builds the adapter for the configured backend.
pub fn from_backend(backend: ProviderBackend, timeout: Duration) -> Result<BoxedSearchProvider> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let provider: BoxedSearchProvider = match backend {
        ProviderBackend::VertexSearch {
            api_key,
            project_id,
            engine_id,
        } => Box::new(VertexSearch::new(client, api_key, project_id, engine_id)),
        ProviderBackend::CustomSearch { api_key, cx } => {
            Box::new(CustomSearch::new(client, api_key, cx))
        }
    };
    Ok(provider)
}

/// Reads a response body into text, turning a non-success status into [`ProviderError::Status`].
pub(crate) async fn read_body(
    provider: &'static str,
    res: reqwest::Response,
) -> Result<String, ProviderError> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        tracing::error!(provider, status = status.as_u16(), %body, "search provider error");
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
            body,
        });
    }
    Ok(res.text().await?)
}
