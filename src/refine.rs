use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data_models::SearchResult;
use crate::platform::{Platform, UnknownPlatform};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Keep the provider's order
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown sort option: {0}")]
pub struct UnknownSort(pub String);

impl FromStr for SortOption {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "relevance" => Ok(SortOption::Relevance),
            "price_asc" => Ok(SortOption::PriceAsc),
            "price_desc" => Ok(SortOption::PriceDesc),
            other => Err(UnknownSort(other.to_string())),
        }
    }
}

/// Post-search narrowing of a result list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Refinement {
    pub sort: SortOption,
    /// Empty means every platform.
    pub platforms: Vec<Platform>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl Refinement {
    pub fn is_noop(&self) -> bool {
        *self == Refinement::default()
    }

    /// Parses a comma separated platform list such as `poshmark,depop`.
    pub fn parse_platforms(raw: &str) -> Result<Vec<Platform>, UnknownPlatform> {
        raw.split(',')
            .filter(|p| !p.trim().is_empty())
            .map(|p| p.parse::<Platform>())
            .collect()
    }

    pub fn apply(&self, results: Vec<SearchResult>) -> Vec<SearchResult> {
        let mut refined: Vec<SearchResult> = results
            .into_iter()
            .filter(|r| self.platforms.is_empty() || self.platforms.contains(&r.platform))
            .filter(|r| self.min_price.is_none_or(|min| r.price >= min))
            .filter(|r| self.max_price.is_none_or(|max| r.price <= max))
            .collect();

        match self.sort {
            SortOption::Relevance => {}
            SortOption::PriceAsc => refined.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOption::PriceDesc => refined.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }
        refined
    }
}
