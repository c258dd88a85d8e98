use serde::{Deserialize, Serialize};

use crate::data_models::{SearchQuery, SearchResult};
use crate::platform::{Platform, PlatformInfo};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub url: Option<String>,
    pub sort: Option<String>,
    pub platforms: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub query: SearchQuery,
    pub total_results: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummary {
    pub id: Platform,
    pub name: String,
    pub domain: String,
    pub color: String,
    pub bg_color: String,
}

impl From<&PlatformInfo> for PlatformSummary {
    fn from(info: &PlatformInfo) -> Self {
        PlatformSummary {
            id: info.platform,
            name: info.name.to_string(),
            domain: info.domain.to_string(),
            color: info.color.to_string(),
            bg_color: info.bg_color.to_string(),
        }
    }
}
