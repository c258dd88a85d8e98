//! Deterministic stand-in results used when no provider is configured or the provider fails.
//! Links point at each platform's real search page so the fallback is still useful.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

use crate::data_models::SearchResult;
use crate::platform::Platform;

const DEMO_TRIGGERS: [&str; 5] = ["nicole", "saldaña", "saldana", "fabiana", "mary jane"];
const DEMO_SEARCH_TERM: &str = "nicole saldana fabiana mary jane";
const DEMO_BRAND: &str = "Nicole Saldaña";
const DEMO_ORIGINAL_PRICE: f64 = 470.0;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

struct DemoListing {
    id: &'static str,
    title: &'static str,
    price: f64,
    platform: Platform,
    seed: &'static str,
    condition: &'static str,
    size: &'static str,
    seller: Option<&'static str>,
}

static DEMO_LISTINGS: [DemoListing; 6] = [
    DemoListing {
        id: "mock-pm-1",
        title: "Nicole Saldaña Fabiana Eyelet Napa Mary Jane - Dark Brown",
        price: 285.0,
        platform: Platform::Poshmark,
        seed: "ns-fabiana-1",
        condition: "Like New",
        size: "38",
        seller: Some("luxefinds22"),
    },
    DemoListing {
        id: "mock-trr-1",
        title: "Nicole Saldaña Fabiana Leather Mary Jane Flats",
        price: 195.0,
        platform: Platform::TheRealReal,
        seed: "ns-fabiana-2",
        condition: "Very Good",
        size: "38.5",
        seller: None,
    },
    DemoListing {
        id: "mock-dep-1",
        title: "Nicole Saldaña Fabiana Mary Jane Dark Brown Napa Leather",
        price: 320.0,
        platform: Platform::Depop,
        seed: "ns-fabiana-3",
        condition: "Good",
        size: "39",
        seller: Some("vintageshoes_co"),
    },
    DemoListing {
        id: "mock-tu-1",
        title: "Nicole Saldaña Brown Leather Mary Jane Shoes",
        price: 149.0,
        platform: Platform::ThredUp,
        seed: "ns-fabiana-4",
        condition: "Good",
        size: "38",
        seller: None,
    },
    DemoListing {
        id: "mock-pm-2",
        title: "Nicole Saldaña Fabiana Eyelet Mary Jane Size 37",
        price: 350.0,
        platform: Platform::Poshmark,
        seed: "ns-fabiana-5",
        condition: "New with Tags",
        size: "37",
        seller: Some("shoecloset"),
    },
    DemoListing {
        id: "mock-trr-2",
        title: "Nicole Saldaña Napa Mary Jane Pumps",
        price: 225.0,
        platform: Platform::TheRealReal,
        seed: "ns-fabiana-6",
        condition: "Good",
        size: "39",
        seller: None,
    },
];

/// One templated listing per platform for queries without curated data.
struct GenericTemplate {
    platform: Platform,
    short: &'static str,
    phrase: &'static str,
    price: f64,
    original_price: f64,
    condition: &'static str,
    seller: Option<&'static str>,
}

static GENERIC_TEMPLATES: [GenericTemplate; 4] = [
    GenericTemplate {
        platform: Platform::Poshmark,
        short: "pm",
        phrase: "Excellent Condition",
        price: 45.0,
        original_price: 120.0,
        condition: "Excellent",
        seller: Some("seller123"),
    },
    GenericTemplate {
        platform: Platform::Depop,
        short: "dep",
        phrase: "Vintage Find",
        price: 38.0,
        original_price: 95.0,
        condition: "Good",
        seller: Some("vintagefinds"),
    },
    GenericTemplate {
        platform: Platform::TheRealReal,
        short: "trr",
        phrase: "Authenticated",
        price: 89.0,
        original_price: 250.0,
        condition: "Very Good",
        seller: None,
    },
    GenericTemplate {
        platform: Platform::ThredUp,
        short: "tu",
        phrase: "Like New",
        price: 29.0,
        original_price: 80.0,
        condition: "Like New",
        seller: None,
    },
];

/// Synthetic results for `query`. Pure and deterministic.
pub fn generate_mock(query: &str) -> Vec<SearchResult> {
    let lowered = query.to_lowercase();
    if DEMO_TRIGGERS.iter().any(|t| lowered.contains(t)) {
        demo_results()
    } else {
        generic_results(query, &lowered)
    }
}

fn demo_results() -> Vec<SearchResult> {
    DEMO_LISTINGS
        .iter()
        .map(|listing| {
            let mut result = SearchResult::new(
                listing.id.to_string(),
                listing.title.to_string(),
                listing.price,
                listing.platform,
                listing.platform.search_url(DEMO_SEARCH_TERM),
            );
            result.original_price = Some(DEMO_ORIGINAL_PRICE);
            result.image_url = Some(product_image(listing.seed));
            result.condition = Some(listing.condition.to_string());
            result.size = Some(listing.size.to_string());
            result.brand = Some(DEMO_BRAND.to_string());
            result.seller = listing.seller.map(str::to_string);
            result
        })
        .collect()
}

fn generic_results(query: &str, lowered: &str) -> Vec<SearchResult> {
    let slug = WHITESPACE.replace_all(lowered, "-");
    let brand = query.split_whitespace().next().map(str::to_string);

    GENERIC_TEMPLATES
        .iter()
        .map(|template| {
            let mut result = SearchResult::new(
                format!("mock-{}-gen-1", template.short),
                format!("{query} - {}", template.phrase),
                template.price,
                template.platform,
                template.platform.search_url(query),
            );
            result.original_price = Some(template.original_price);
            result.image_url = Some(product_image(&format!("{}-{slug}", template.short)));
            result.condition = Some(template.condition.to_string());
            result.brand = brand.clone();
            result.seller = template.seller.map(str::to_string);
            result
        })
        .collect()
}

/// Placeholder photo; the same seed always gives the same image.
fn product_image(seed: &str) -> String {
    let mut url = match Url::parse("https://picsum.photos/seed/") {
        Ok(url) => url,
        Err(_) => return format!("https://picsum.photos/seed/{seed}/400/500"),
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(seed).push("400").push("500");
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_results_are_curated_and_stable() {
        let first = generate_mock("nicole saldana fabiana");
        let second = generate_mock("NICOLE SALDANA FABIANA");
        assert_eq!(first.len(), 6);
        assert_eq!(first, second);

        let ids: Vec<&str> = first.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["mock-pm-1", "mock-trr-1", "mock-dep-1", "mock-tu-1", "mock-pm-2", "mock-trr-2"]
        );
        assert_eq!(first[0].price, 285.0);
        assert_eq!(first[0].original_price, Some(470.0));
        assert_eq!(first[0].size.as_deref(), Some("38"));
        assert_eq!(first[0].seller.as_deref(), Some("luxefinds22"));
        assert_eq!(first[1].seller, None);
        assert_eq!(
            first[0].image_url.as_deref(),
            Some("https://picsum.photos/seed/ns-fabiana-1/400/500")
        );
        assert_eq!(
            first[0].url,
            "https://poshmark.com/search?query=nicole%20saldana%20fabiana%20mary%20jane&type=listings"
        );
        assert!(first.iter().all(|r| r.brand.as_deref() == Some("Nicole Saldaña")));
    }

    #[test]
    fn test_demo_triggers() {
        assert_eq!(generate_mock("Saldaña heels").len(), 6);
        assert_eq!(generate_mock("brown Mary Jane flats").len(), 6);
        assert_eq!(generate_mock("mary-jane").len(), 4);
    }

    #[test]
    fn test_generic_results() {
        let results = generate_mock("red wool coat");
        assert_eq!(results.len(), 4);

        let platforms: Vec<Platform> = results.iter().map(|r| r.platform).collect();
        assert_eq!(platforms, Platform::ALL.to_vec());
        assert!(results.iter().all(|r| r.brand.as_deref() == Some("red")));
        assert!(results.iter().all(|r| r.currency == "USD"));

        assert_eq!(results[0].id, "mock-pm-gen-1");
        assert_eq!(results[0].title, "red wool coat - Excellent Condition");
        assert_eq!(results[1].title, "red wool coat - Vintage Find");
        assert_eq!(results[2].title, "red wool coat - Authenticated");
        assert_eq!(results[3].title, "red wool coat - Like New");
        assert_eq!((results[2].price, results[2].original_price), (89.0, Some(250.0)));
        assert_eq!(
            results[1].image_url.as_deref(),
            Some("https://picsum.photos/seed/dep-red-wool-coat/400/500")
        );
        assert_eq!(
            results[3].url,
            "https://www.thredup.com/search?search_text=red%20wool%20coat"
        );
    }

    #[test]
    fn test_generic_keeps_query_case_in_title() {
        let results = generate_mock("Ganni  Dress");
        assert_eq!(results[0].title, "Ganni  Dress - Excellent Condition");
        assert_eq!(results[0].brand.as_deref(), Some("Ganni"));
        assert_eq!(
            results[0].image_url.as_deref(),
            Some("https://picsum.photos/seed/pm-ganni-dress/400/500")
        );
    }
}
