use super::*;
use offer_finder::fetcher::HttpFetcher;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DETAIL_PATH: &str = "/pl/94-4341520/Hoerlurar-Gaming-Headsets/Bose-QuietComfort-35-II-priser";

/// Pipeline backed by the real HTTP fetcher, pointed at a mock site.
fn live_finder(server: &MockServer) -> anyhow::Result<PriceFinder> {
    let mut config = get_test_config();
    config.site.base_url = server.uri();
    config.validate()?;

    let fetcher = Arc::new(HttpFetcher::new(&config.scraper)?);
    Ok(PriceFinder::new(fetcher, &config)?)
}

async fn mount_search_page(server: &MockServer, term: &str) {
    Mock::given(method("GET"))
        .and(path("/results"))
        .and(query_param("q", term))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pipeline_over_http() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_search_page(&server, "headset").await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(OFFER_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let result = live_finder(&server)?.find("headset").await;

    assert_eq!(result.product.display_name, "Bose QuietComfort 35 II");
    assert_eq!(result.product.detail_link, format!("{}{}", server.uri(), DETAIL_PATH));
    let prices: Vec<i64> = result.vendors.iter().map(|v| v.price).collect();
    assert_eq!(prices, vec![2990, 3149, 3295, 3490]);
    Ok(())
}

#[tokio::test]
async fn test_pipeline_encodes_search_term() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_search_page(&server, "bose qc35").await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(OFFER_PAGE))
        .mount(&server)
        .await;

    let result = live_finder(&server)?.find("bose qc35").await;

    assert!(result.product.is_resolved());
    assert_eq!(result.vendors.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_pipeline_detail_server_error() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_search_page(&server, "headset").await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = live_finder(&server)?.find("headset").await;

    assert_eq!(result.product.display_name, "Bose QuietComfort 35 II");
    assert!(result.vendors.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_pipeline_detail_timeout() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_search_page(&server, "headset").await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(OFFER_PAGE)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let result = live_finder(&server)?.find("headset").await;

    assert!(result.product.is_resolved());
    assert!(result.vendors.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_pipeline_search_not_found_status() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = live_finder(&server)?.find("headset").await;

    assert_eq!(result.product.display_name, "");
    assert!(result.vendors.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_router_over_http_pipeline() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_search_page(&server, "headset").await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(OFFER_PAGE))
        .mount(&server)
        .await;

    let finder = Arc::new(live_finder(&server)?);
    let app = create_router(AppState { finder });

    let response = make_request(&app, axum::http::Method::GET, "/find/headset").await?;

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["vendors"].as_array().map(Vec::len), Some(4));
    Ok(())
}
