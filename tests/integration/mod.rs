// Integration tests for offer-finder
// These tests drive the HTTP router and the full search pipeline together

pub mod pipeline_tests;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use offer_finder::{
    AppConfig, AppError, PriceFinder,
    fetcher::PageFetcher,
    web::{AppState, create_router},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const SEARCH_PAGE: &str = include_str!("../fixtures/search_results.html");
pub const OFFER_PAGE: &str = include_str!("../fixtures/product_offers.html");

pub const SEARCH_URL: &str = "https://www.pricerunner.se/results?q=headset";
pub const DETAIL_URL: &str =
    "https://www.pricerunner.se/pl/94-4341520/Hoerlurar-Gaming-Headsets/Bose-QuietComfort-35-II-priser";

/// Serves canned pages by exact URL; anything else fails like a network error.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> offer_finder::Result<String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("connection refused: {}", url)))
    }
}

/// Test configuration for integration tests
pub fn get_test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.scraper.request_timeout = 1;
    config.scraper.user_agent = "OfferFinder-Test/1.0".to_string();
    config
}

/// Create test app state around the given fetcher
pub fn create_test_app_state(fetcher: Arc<dyn PageFetcher>) -> anyhow::Result<AppState> {
    let config = get_test_config();
    let finder = Arc::new(PriceFinder::new(fetcher, &config)?);

    Ok(AppState { finder })
}

pub fn create_test_app(fetcher: Arc<dyn PageFetcher>) -> anyhow::Result<Router> {
    Ok(create_router(create_test_app_state(fetcher)?))
}

/// Helper to make HTTP requests to the test app
pub async fn make_request(
    app: &Router,
    method: Method,
    uri: &str,
) -> anyhow::Result<axum::response::Response> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())?;

    let response = app.clone().oneshot(request).await?;
    Ok(response)
}

pub async fn body_json(response: axum::response::Response) -> anyhow::Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
