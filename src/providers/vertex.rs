use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::extract::{Pagemap, RawProviderItem, lenient};
use super::{RESULT_LIMIT, SearchProvider, read_body};
use crate::data_models::SearchResult;
use crate::error::ProviderError;

pub const VERTEX_SEARCH_BASE: &str = "https://discoveryengine.googleapis.com/v1";
const ID_TAG: &str = "vais";

/// Vertex AI Search (Discovery Engine) `searchLite`, authenticated with an API key.
pub struct VertexSearch {
    client: reqwest::Client,
    api_key: String,
    project_id: String,
    engine_id: String,
    base_url: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SearchLiteRequest<'a> {
    query: &'a str,
    page_size: usize,
}

#[derive(Deserialize, Debug, Default)]
pub struct VertexSearchResponse {
    #[serde(default)]
    pub results: Vec<VertexResult>,
}

#[derive(Deserialize, Debug, Default)]
pub struct VertexResult {
    #[serde(default, deserialize_with = "lenient")]
    pub document: VertexDocument,
}

#[derive(Deserialize, Debug, Default)]
pub struct VertexDocument {
    #[serde(default, rename = "derivedStructData", deserialize_with = "lenient")]
    pub derived_struct_data: DerivedStructData,
}

#[derive(Deserialize, Debug, Default)]
pub struct DerivedStructData {
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub link: String,
    #[serde(default, deserialize_with = "lenient")]
    pub snippets: Vec<VertexSnippet>,
    #[serde(default, deserialize_with = "lenient")]
    pub pagemap: Option<Pagemap>,
}

#[derive(Deserialize, Debug, Default)]
pub struct VertexSnippet {
    #[serde(default, deserialize_with = "lenient")]
    pub snippet: String,
}

impl RawProviderItem for VertexResult {
    fn title(&self) -> &str {
        &self.document.derived_struct_data.title
    }

    fn link(&self) -> &str {
        &self.document.derived_struct_data.link
    }

    fn snippet(&self) -> String {
        self.document
            .derived_struct_data
            .snippets
            .iter()
            .map(|s| s.snippet.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn pagemap(&self) -> Option<&Pagemap> {
        self.document.derived_struct_data.pagemap.as_ref()
    }
}

impl VertexSearchResponse {
    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.to_search_result(ID_TAG, index))
            .collect()
    }
}

impl VertexSearch {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        project_id: String,
        engine_id: String,
    ) -> VertexSearch {
        VertexSearch {
            client,
            api_key,
            project_id,
            engine_id,
            base_url: VERTEX_SEARCH_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> VertexSearch {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/projects/{}/locations/global/collections/default_collection/engines/{}/servingConfigs/default_search:searchLite",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.engine_id
        )
    }
}

#[async_trait]
impl SearchProvider for VertexSearch {
    fn name(&self) -> &'static str {
        "vertex_search"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ProviderError> {
        let res = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&SearchLiteRequest {
                query,
                page_size: RESULT_LIMIT,
            })
            .send()
            .await?;

        let body = read_body(self.name(), res).await?;
        let response: VertexSearchResponse = serde_json::from_str(&body)?;
        Ok(response.into_results())
    }
}
