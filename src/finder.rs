use std::sync::Arc;
use tokio::time::Instant;

use crate::config::AppConfig;
use crate::extractor::OfferExtractor;
use crate::fetcher::PageFetcher;
use crate::models::SearchResult;
use crate::price::PriceNormalizer;
use crate::resolver::ProductResolver;
use crate::selectors::SiteSelectors;
use crate::utils::error::Result;

/// Runs the search → detail page pipeline for one search term.
pub struct PriceFinder {
    resolver: ProductResolver,
    extractor: OfferExtractor,
    offer_limit: usize,
}

impl PriceFinder {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &AppConfig) -> Result<Self> {
        let selectors = Arc::new(SiteSelectors::compile(&config.site)?);
        let normalizer = PriceNormalizer::from_site(&config.site)?;

        Ok(Self {
            resolver: ProductResolver::new(fetcher.clone(), selectors.clone(), &config.site)?,
            extractor: OfferExtractor::new(fetcher, selectors, normalizer),
            offer_limit: config.scraper.offer_limit,
        })
    }

    pub fn offer_limit(&self) -> usize {
        self.offer_limit
    }

    pub async fn find(&self, search: &str) -> SearchResult {
        self.find_with_limit(search, self.offer_limit).await
    }

    /// Extraction runs even when resolution failed; an empty link simply
    /// fails to fetch and yields no vendors.
    pub async fn find_with_limit(&self, search: &str, limit: usize) -> SearchResult {
        let start_time = Instant::now();

        let product = self.resolver.resolve(search).await;
        let vendors = self
            .extractor
            .extract_offers(&product.detail_link, limit)
            .await;

        tracing::info!(
            search = %search,
            product = %product.display_name,
            vendors = vendors.len(),
            elapsed_ms = %start_time.elapsed().as_millis(),
            "Search completed"
        );

        SearchResult::new(product, vendors)
    }
}
