use scraper::{ElementRef, Html};
use std::sync::Arc;
use url::Url;

use crate::config::SiteConfig;
use crate::fetcher::PageFetcher;
use crate::models::{ProductMatch, NOT_FOUND_LABEL};
use crate::selectors::{element_text, SiteSelectors};
use crate::utils::error::{AppError, Result};

/// Maps a search term to the first product listed on the site's search page.
pub struct ProductResolver {
    fetcher: Arc<dyn PageFetcher>,
    selectors: Arc<SiteSelectors>,
    base_url: Url,
    search_path: String,
    search_param: String,
}

impl ProductResolver {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        selectors: Arc<SiteSelectors>,
        site: &SiteConfig,
    ) -> Result<Self> {
        let base_url = Url::parse(&site.base_url).map_err(|e| AppError::InvalidUrl {
            url: site.base_url.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            fetcher,
            selectors,
            base_url,
            search_path: site.search_path.clone(),
            search_param: site.search_param.clone(),
        })
    }

    /// The term goes in unescaped; the HTTP client percent-encodes it.
    pub fn search_url(&self, term: &str) -> String {
        format!(
            "{}{}?{}={}",
            self.base_url.as_str().trim_end_matches('/'),
            self.search_path,
            self.search_param,
            term
        )
    }

    /// Never fails: fetch and structure problems are logged and yield
    /// [`ProductMatch::empty`].
    pub async fn resolve(&self, term: &str) -> ProductMatch {
        tracing::info!(search = %term, "Received search words");

        let url = self.search_url(term);
        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to fetch search results");
                return ProductMatch::empty();
            }
        };

        match parse_search_page(&html, &self.selectors, &self.base_url) {
            Ok(product) => {
                tracing::debug!(
                    display_name = %product.display_name,
                    detail_link = %product.detail_link,
                    "Resolved product"
                );
                product
            }
            Err(e) => {
                tracing::warn!(search = %term, error = %e, "Failed to resolve product");
                ProductMatch::empty()
            }
        }
    }
}

/// Picks the first product heading and reads the link from its result card.
///
/// A page without any heading is not an error and yields
/// [`ProductMatch::not_found`].
pub fn parse_search_page(
    html: &str,
    selectors: &SiteSelectors,
    base_url: &Url,
) -> Result<ProductMatch> {
    let document = Html::parse_document(html);

    let Some(heading) = document.select(&selectors.heading).next() else {
        return Ok(ProductMatch::not_found());
    };

    let mut display_name = element_text(heading);
    if display_name.is_empty() {
        display_name = NOT_FOUND_LABEL.to_string();
    }
    let card = card_container(heading, selectors.card_ancestor_depth)?;

    // `select` also matches the card itself; only descendants count.
    let href = card
        .select(&selectors.link)
        .filter(|link| link.id() != card.id())
        .find_map(|link| link.value().attr("href"))
        .ok_or_else(|| AppError::structure("result card has no product link"))?;

    let detail_link = base_url.join(href.trim()).map_err(|e| AppError::InvalidUrl {
        url: href.to_string(),
        message: e.to_string(),
    })?;

    Ok(ProductMatch::new(display_name, detail_link.to_string()))
}

/// The element `depth` levels above `heading`.
fn card_container(heading: ElementRef<'_>, depth: usize) -> Result<ElementRef<'_>> {
    heading
        .ancestors()
        .filter_map(ElementRef::wrap)
        .nth(depth.saturating_sub(1))
        .ok_or_else(|| {
            let available = heading.ancestors().filter_map(ElementRef::wrap).count();
            AppError::structure(format!(
                "product heading has {} ancestors, expected at least {}",
                available, depth
            ))
        })
}
