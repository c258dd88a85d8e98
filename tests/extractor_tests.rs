use std::time::Duration;

use axum::{
    Router,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::Html,
    routing::get,
};

use thriftfinder::data_models::ProductInfo;
use thriftfinder::extractor::{Degradation, EXTRACTOR_USER_AGENT, UrlExtractor};

mod test_helpers {
    use super::*;

    pub const PRODUCT_PAGE: &str = r#"<!doctype html>
<html>
  <head>
    <title>Fabiana | Nicole Saldaña</title>
    <meta property="og:title" content="Fabiana Eyelet Napa Mary Jane &amp; Strap">
    <meta content="Nicole Saldaña" property="product:brand">
    <meta property="product:price:amount" content="470.00">
    <meta property="product:price:currency" content="USD">
  </head>
  <body><h1>Fabiana</h1></body>
</html>"#;

    async fn product() -> Html<&'static str> {
        Html(PRODUCT_PAGE)
    }

    async fn agent_echo(headers: HeaderMap) -> Html<String> {
        let agent = headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        Html(format!(r#"<meta property="og:title" content="{agent}">"#))
    }

    async fn forbidden() -> (StatusCode, Html<&'static str>) {
        (StatusCode::FORBIDDEN, Html(PRODUCT_PAGE))
    }

    async fn slow() -> Html<&'static str> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Html(PRODUCT_PAGE)
    }

    pub async fn spawn_shop() -> String {
        let router = Router::new()
            .route("/products/fabiana", get(product))
            .route("/agent", get(agent_echo))
            .route("/blocked/fabiana", get(forbidden))
            .route("/slow/linen-shirt", get(slow));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    pub fn extractor() -> UrlExtractor {
        UrlExtractor::new(Duration::from_secs(8)).unwrap()
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_extracts_meta_tags() {
    let base = spawn_shop().await;
    let url = format!("{base}/products/fabiana");

    let extraction = extractor().extract_with_outcome(&url).await;
    assert_eq!(extraction.degradation, None);
    assert_eq!(
        extraction.info,
        ProductInfo {
            name: Some("Fabiana Eyelet Napa Mary Jane & Strap".to_string()),
            brand: Some("Nicole Saldaña".to_string()),
            price: Some(470.0),
            url,
        }
    );
}

#[tokio::test]
async fn test_sends_identifying_user_agent() {
    let base = spawn_shop().await;
    let info = extractor().extract(&format!("{base}/agent")).await;
    assert_eq!(info.name.as_deref(), Some(EXTRACTOR_USER_AGENT));
}

#[tokio::test]
async fn test_not_found_yields_bare_info() {
    let base = spawn_shop().await;
    let url = format!("{base}/products/does-not-exist");

    let extraction = extractor().extract_with_outcome(&url).await;
    assert_eq!(extraction.info, ProductInfo::bare(url));
    assert_eq!(extraction.degradation, Some(Degradation::HttpStatus(404)));
}

#[tokio::test]
async fn test_error_status_ignores_body() {
    let base = spawn_shop().await;
    let url = format!("{base}/blocked/fabiana");

    let extraction = extractor().extract_with_outcome(&url).await;
    assert_eq!(extraction.info, ProductInfo::bare(url));
    assert_eq!(extraction.degradation, Some(Degradation::HttpStatus(403)));
}

#[tokio::test]
async fn test_connection_failure_derives_name_from_path() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{addr}/shop/nicole-saldana-fabiana-shoe");
    let extraction = extractor().extract_with_outcome(&url).await;
    assert_eq!(
        extraction.info,
        ProductInfo {
            name: Some("nicole saldana fabiana shoe".to_string()),
            url,
            ..Default::default()
        }
    );
    assert!(matches!(extraction.degradation, Some(Degradation::Network(_))));
}

#[tokio::test]
async fn test_timeout_degrades_like_network_failure() {
    let base = spawn_shop().await;
    let extractor = UrlExtractor::new(Duration::from_millis(200)).unwrap();

    let url = format!("{base}/slow/linen-shirt");
    let extraction = extractor.extract_with_outcome(&url).await;
    assert_eq!(extraction.info.name.as_deref(), Some("linen shirt"));
    assert_eq!(extraction.info.brand, None);
    assert!(matches!(extraction.degradation, Some(Degradation::Network(_))));
}

#[tokio::test]
async fn test_unparseable_url_degrades_without_name() {
    let info = extractor().extract("not a url").await;
    assert_eq!(info, ProductInfo::bare("not a url"));
}
