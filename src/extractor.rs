use scraper::{ElementRef, Html};
use std::sync::Arc;

use crate::fetcher::PageFetcher;
use crate::models::VendorOffer;
use crate::price::PriceNormalizer;
use crate::selectors::{first_text, SiteSelectors};
use crate::utils::error::Result;

/// Markup variant of one offer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape<'a> {
    /// Sponsored listing; carries the descriptive label attribute.
    Partner { label: &'a str },
    /// Organic listing; vendor and product come from styled text elements.
    Standard,
}

/// Number of candidate rows inspected for a given offer limit.
///
/// Inspection stops once the row index reaches `limit - 1`, so at most
/// `limit - 1` rows are looked at, even though the limit reads as inclusive.
pub fn rows_to_inspect(limit: usize) -> usize {
    limit.saturating_sub(1)
}

/// Reads the vendor offers listed on a product detail page.
pub struct OfferExtractor {
    fetcher: Arc<dyn PageFetcher>,
    selectors: Arc<SiteSelectors>,
    normalizer: PriceNormalizer,
}

impl OfferExtractor {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        selectors: Arc<SiteSelectors>,
        normalizer: PriceNormalizer,
    ) -> Self {
        Self {
            fetcher,
            selectors,
            normalizer,
        }
    }

    /// Never fails: a page that cannot be fetched yields no offers.
    pub async fn extract_offers(&self, detail_link: &str, limit: usize) -> Vec<VendorOffer> {
        tracing::info!(url = %detail_link, limit, "Scraping vendor offers");

        match self.fetcher.fetch(detail_link).await {
            Ok(html) => parse_offer_page(&html, &self.selectors, &self.normalizer, limit),
            Err(e) => {
                tracing::warn!(url = %detail_link, error = %e, "Failed to fetch vendor offerings");
                Vec::new()
            }
        }
    }
}

pub fn parse_offer_page(
    html: &str,
    selectors: &SiteSelectors,
    normalizer: &PriceNormalizer,
    limit: usize,
) -> Vec<VendorOffer> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.offer_row)
        .take(rows_to_inspect(limit))
        .enumerate()
        .fold(Vec::new(), |mut offers, (index, row)| {
            match parse_offer_row(row, selectors, normalizer) {
                Ok(Some(offer)) => {
                    tracing::debug!(
                        entry = index,
                        vendor = %offer.vendor_name,
                        product = %offer.offered_product_label,
                        price = offer.price,
                        "Parsed offer"
                    );
                    offers.push(offer);
                }
                Ok(None) => {
                    tracing::debug!(entry = index, "Skipping offer row without vendor");
                }
                Err(e) => {
                    tracing::warn!(entry = index, error = %e, "Skipping offer row");
                }
            }
            offers
        })
}

pub fn row_shape<'a>(row: ElementRef<'a>, selectors: &SiteSelectors) -> RowShape<'a> {
    match row.value().attr(&selectors.partner_label_attribute) {
        Some(label) if !label.trim().is_empty() => RowShape::Partner { label },
        _ => RowShape::Standard,
    }
}

/// `Ok(None)` when the row has no vendor.
fn parse_offer_row(
    row: ElementRef<'_>,
    selectors: &SiteSelectors,
    normalizer: &PriceNormalizer,
) -> Result<Option<VendorOffer>> {
    let (vendor, product) = match row_shape(row, selectors) {
        RowShape::Partner { label } => (
            partner_vendor(label),
            first_text(row, &selectors.partner_product),
        ),
        RowShape::Standard => (
            first_text(row, &selectors.vendor),
            first_text(row, &selectors.product),
        ),
    };

    if vendor.is_empty() {
        return Ok(None);
    }

    let price = normalizer.normalize(&first_text(row, &selectors.price))?;

    Ok(Some(VendorOffer::new(vendor, product, price)))
}

/// Vendor is everything before the first comma of the partner label.
fn partner_vendor(label: &str) -> String {
    label.split(',').next().unwrap_or_default().trim().to_string()
}
