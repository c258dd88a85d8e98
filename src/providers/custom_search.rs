use async_trait::async_trait;
use serde::Deserialize;

use super::extract::{Pagemap, RawProviderItem, lenient};
use super::{RESULT_LIMIT, SearchProvider, read_body};
use crate::data_models::SearchResult;
use crate::error::ProviderError;

pub const CUSTOM_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
const ID_TAG: &str = "gcs";

/// Google Programmable Search (Custom Search JSON API), keyed by an API key and a `cx` engine id.
pub struct CustomSearch {
    client: reqwest::Client,
    api_key: String,
    cx: String,
    endpoint: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct CustomSearchResponse {
    #[serde(default)]
    pub items: Vec<CustomSearchItem>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CustomSearchItem {
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub link: String,
    #[serde(default, deserialize_with = "lenient")]
    pub snippet: String,
    #[serde(default, deserialize_with = "lenient")]
    pub pagemap: Option<Pagemap>,
}

impl RawProviderItem for CustomSearchItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn link(&self) -> &str {
        &self.link
    }

    fn snippet(&self) -> String {
        self.snippet.clone()
    }

    fn pagemap(&self) -> Option<&Pagemap> {
        self.pagemap.as_ref()
    }
}

impl CustomSearchResponse {
    pub fn into_results(self) -> Vec<SearchResult> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.to_search_result(ID_TAG, index))
            .collect()
    }
}

impl CustomSearch {
    pub fn new(client: reqwest::Client, api_key: String, cx: String) -> CustomSearch {
        CustomSearch {
            client,
            api_key,
            cx,
            endpoint: CUSTOM_SEARCH_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> CustomSearch {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchProvider for CustomSearch {
    fn name(&self) -> &'static str {
        "custom_search"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ProviderError> {
        let num = RESULT_LIMIT.to_string();
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cx.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let body = read_body(self.name(), res).await?;
        let response: CustomSearchResponse = serde_json::from_str(&body)?;
        Ok(response.into_results())
    }
}
