use std::time::Duration;

use anyhow::Result;
use once_cell::sync::Lazy;
use reqwest::Url;
use reqwest::header::USER_AGENT;
use scraper::{ElementRef, Html, Selector};

use crate::data_models::ProductInfo;
use crate::parse::parse_float_prefix;

pub const EXTRACTOR_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; ThriftFinder/1.0; +https://thriftfinder.app)";

static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta").expect("valid meta selector"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));

/// Why an extraction returned less than a parsed page.
#[derive(Debug, Clone, PartialEq)]
pub enum Degradation {
    /// The page answered with a non-success status
    HttpStatus(u16),
    /// Connect, timeout or body read failure
    Network(String),
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub info: ProductInfo,
    pub degradation: Option<Degradation>,
}

/// Fetches a retailer product page and pulls a name, brand and price out of its meta tags.
/// Never fails: a bad status or a dead link degrade to partial info.
pub struct UrlExtractor {
    client: reqwest::Client,
}

impl UrlExtractor {
    pub fn new(timeout: Duration) -> Result<UrlExtractor> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(UrlExtractor { client })
    }

    pub async fn extract(&self, url: &str) -> ProductInfo {
        self.extract_with_outcome(url).await.info
    }

    pub async fn extract_with_outcome(&self, url: &str) -> Extraction {
        match self.fetch_page(url).await {
            Ok(FetchedPage::Body(html)) => Extraction {
                info: parse_product_page(&html, url),
                degradation: None,
            },
            Ok(FetchedPage::Status(status)) => {
                tracing::warn!(url, status, "product page returned non-success status");
                Extraction {
                    info: ProductInfo::bare(url),
                    degradation: Some(Degradation::HttpStatus(status)),
                }
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "failed to fetch product url, using url path");
                Extraction {
                    info: ProductInfo {
                        name: name_from_url(url),
                        ..ProductInfo::bare(url)
                    },
                    degradation: Some(Degradation::Network(e.to_string())),
                }
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        let res = self
            .client
            .get(url)
            .header(USER_AGENT, EXTRACTOR_USER_AGENT)
            .send()
            .await?;
        if !res.status().is_success() {
            return Ok(FetchedPage::Status(res.status().as_u16()));
        }
        let body = res.text().await?;
        Ok(FetchedPage::Body(body))
    }
}

enum FetchedPage {
    Body(String),
    Status(u16),
}

/// Reads product details from page markup. Entities are decoded by the HTML parser and
/// attribute order inside a tag does not matter.
pub fn parse_product_page(html: &str, url: &str) -> ProductInfo {
    let document = Html::parse_document(html);

    let name = meta_content(&document, "og:title").or_else(|| page_title(&document));
    let brand =
        meta_content(&document, "product:brand").or_else(|| meta_content(&document, "og:brand"));
    let price = meta_content(&document, "product:price:amount")
        .or_else(|| meta_content(&document, "og:price:amount"))
        .and_then(|raw| parse_float_prefix(&raw));

    ProductInfo {
        name,
        brand,
        price,
        url: url.to_string(),
    }
}

/// Content of the first `<meta>` whose `property` or `name` is `key` (case-insensitive).
fn meta_content(document: &Html, key: &str) -> Option<String> {
    document
        .select(&META_SELECTOR)
        .filter(|meta| meta_key_matches(meta, key))
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

fn meta_key_matches(meta: &ElementRef, key: &str) -> bool {
    ["property", "name"]
        .iter()
        .filter_map(|attr| meta.value().attr(attr))
        .any(|value| value.trim().eq_ignore_ascii_case(key))
}

fn page_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Readable name from the last path segment: `/p/nicole-saldana-fabiana.html` gives
/// `nicole saldana fabiana`.
pub fn name_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let slug = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()?;
    let readable = slug.replace(['-', '_'], " ");
    let readable = match readable.rfind('.') {
        Some(dot)
            if dot + 1 < readable.len()
                && readable[dot + 1..]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric()) =>
        {
            readable[..dot].to_string()
        }
        _ => readable,
    };
    Some(readable).filter(|name| !name.trim().is_empty())
}
