//! Field extraction shared by every provider adapter, so price/image/brand resolve the same
//! way regardless of where an item came from.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::data_models::SearchResult;
use crate::parse::{find_dollar_amount, parse_float_prefix, parse_loose_price, strip_bold_tags};
use crate::platform::Platform;

/// Structured data Google attaches to a result. Every entry is a list; only the first is used.
/// Site owners fill it in freely, so a field of the wrong shape reads as absent.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Pagemap {
    #[serde(default, deserialize_with = "lenient")]
    pub offer: Vec<PagemapOffer>,
    #[serde(default, deserialize_with = "lenient")]
    pub product: Vec<PagemapProduct>,
    #[serde(default, deserialize_with = "lenient")]
    pub cse_image: Vec<PagemapImage>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PagemapOffer {
    #[serde(default)]
    pub price: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PagemapProduct {
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PagemapImage {
    #[serde(default, deserialize_with = "lenient")]
    pub src: Option<String>,
}

/// Decodes a field, or falls back to its default when the value has an unexpected shape.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A provider's raw item, before normalization.
pub trait RawProviderItem {
    fn title(&self) -> &str;
    fn link(&self) -> &str;
    /// Description text, possibly containing `<b>` highlighting.
    fn snippet(&self) -> String;
    fn pagemap(&self) -> Option<&Pagemap>;

    /// Canonical result for this item, or `None` when the link is not on a known platform.
    /// `index` is the item's position in the raw response.
    fn to_search_result(&self, tag: &str, index: usize) -> Option<SearchResult> {
        let platform = Platform::detect(self.link())?;
        let pagemap = self.pagemap();

        let mut result = SearchResult::new(
            format!("{tag}-{platform}-{index}"),
            self.title().to_string(),
            extract_price(self.title(), &self.snippet(), pagemap).unwrap_or(0.0),
            platform,
            self.link().to_string(),
        );
        result.image_url = extract_image(pagemap);
        result.brand = extract_brand(pagemap);
        Some(result)
    }
}

/// Offer price, then product price, then a `$NN.NN` in the title, then in the snippet.
pub fn extract_price(title: &str, snippet: &str, pagemap: Option<&Pagemap>) -> Option<f64> {
    let offer_price = pagemap
        .and_then(|p| p.offer.first())
        .and_then(|offer| offer.price.as_ref())
        .and_then(|price| numeric_value(price, parse_float_prefix));
    if offer_price.is_some() {
        return offer_price;
    }

    let product_price = pagemap
        .and_then(|p| p.product.first())
        .and_then(|product| product.price.as_ref())
        .and_then(|price| numeric_value(price, parse_loose_price));
    if product_price.is_some() {
        return product_price;
    }

    find_dollar_amount(title).or_else(|| find_dollar_amount(&strip_bold_tags(snippet)))
}

pub fn extract_image(pagemap: Option<&Pagemap>) -> Option<String> {
    let pagemap = pagemap?;
    pagemap
        .cse_image
        .first()
        .and_then(|img| non_empty(img.src.as_deref()))
        .or_else(|| {
            pagemap
                .product
                .first()
                .and_then(|product| non_empty(product.image.as_deref()))
        })
}

pub fn extract_brand(pagemap: Option<&Pagemap>) -> Option<String> {
    pagemap?
        .product
        .first()
        .and_then(|product| non_empty(product.brand.as_deref()))
}

fn numeric_value(value: &Value, parse_text: fn(&str) -> Option<f64>) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_text(s),
        _ => None,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pagemap(value: Value) -> Pagemap {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_structured_price_beats_title() {
        let pm = pagemap(json!({ "offer": [{ "price": "30.00" }] }));
        assert_eq!(extract_price("Coat $12.50", "", Some(&pm)), Some(30.0));
    }

    #[test]
    fn test_numeric_offer_price() {
        let pm = pagemap(json!({ "offer": [{ "price": 18.5 }] }));
        assert_eq!(extract_price("Coat", "", Some(&pm)), Some(18.5));
    }

    #[test]
    fn test_product_price_strips_symbols() {
        let pm = pagemap(json!({
            "offer": [{ "price": "n/a" }],
            "product": [{ "price": "$1,299.00" }]
        }));
        assert_eq!(extract_price("Coat $5", "", Some(&pm)), Some(1299.0));
    }

    #[test]
    fn test_title_then_snippet() {
        assert_eq!(extract_price("Coat $12.50", "$99", None), Some(12.5));
        assert_eq!(
            extract_price("Coat", "Listed at <b>$</b><b>64</b> with tags", None),
            Some(64.0)
        );
        assert_eq!(extract_price("Coat", "no price", None), None);
    }

    #[test]
    fn test_image_prefers_cse_image() {
        let pm = pagemap(json!({
            "cse_image": [{ "src": "https://img/cse.jpg" }],
            "product": [{ "image": "https://img/product.jpg" }]
        }));
        assert_eq!(extract_image(Some(&pm)).as_deref(), Some("https://img/cse.jpg"));

        let pm = pagemap(json!({ "product": [{ "image": "https://img/product.jpg" }] }));
        assert_eq!(
            extract_image(Some(&pm)).as_deref(),
            Some("https://img/product.jpg")
        );
        assert_eq!(extract_image(None), None);
    }

    #[test]
    fn test_malformed_fields_read_as_absent() {
        let pm = pagemap(json!({
            "offer": "not a list",
            "product": [{
                "brand": { "name": "Ganni" },
                "image": ["https://img/a.jpg"],
                "price": "$45.00"
            }],
            "cse_image": [{ "src": 42 }]
        }));
        assert!(pm.offer.is_empty());
        assert_eq!(extract_brand(Some(&pm)), None);
        assert_eq!(extract_image(Some(&pm)), None);
        assert_eq!(extract_price("Dress", "", Some(&pm)), Some(45.0));
    }

    #[test]
    fn test_brand() {
        let pm = pagemap(json!({ "product": [{ "brand": "Ganni" }] }));
        assert_eq!(extract_brand(Some(&pm)).as_deref(), Some("Ganni"));
        let pm = pagemap(json!({ "product": [{ "brand": "" }] }));
        assert_eq!(extract_brand(Some(&pm)), None);
    }
}
