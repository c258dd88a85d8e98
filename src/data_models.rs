use serde::{Deserialize, Serialize};

use crate::platform::Platform;

pub const CURRENCY_USD: &str = "USD";

/// What the caller asked for. Either field may be missing; with both missing the search is empty.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SearchQuery {
    pub fn new(text: Option<String>, url: Option<String>) -> SearchQuery {
        SearchQuery {
            text: text.filter(|t| !t.is_empty()),
            url: url.filter(|u| !u.is_empty()),
        }
    }

    pub fn from_text(text: impl Into<String>) -> SearchQuery {
        SearchQuery::new(Some(text.into()), None)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.url.is_none()
    }
}

/// A single listing, in the same shape whichever provider produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    /// `0.0` means no price was found, not that the item is free.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub currency: String,
    pub platform: Platform,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
}

impl SearchResult {
    pub fn new(id: String, title: String, price: f64, platform: Platform, url: String) -> SearchResult {
        SearchResult {
            id,
            title,
            price,
            original_price: None,
            currency: CURRENCY_USD.to_string(),
            platform,
            url,
            image_url: None,
            condition: None,
            size: None,
            brand: None,
            seller: None,
        }
    }
}

/// Best-effort product details scraped from a retailer page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductInfo {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub url: String,
}

impl ProductInfo {
    pub fn bare(url: impl Into<String>) -> ProductInfo {
        ProductInfo {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Brand then name, for prefixing a search string.
    pub fn search_terms(&self) -> impl Iterator<Item = &str> {
        [self.brand.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
    }
}
