//! Compiled CSS selectors for the comparison site.
//!
//! The selector strings live in [`SiteConfig`] so a markup change on the site
//! is a configuration update. They are parsed once at startup.

use scraper::{ElementRef, Selector};

use crate::config::SiteConfig;
use crate::utils::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct SiteSelectors {
    pub heading: Selector,
    pub card_ancestor_depth: usize,
    pub link: Selector,
    pub offer_row: Selector,
    pub partner_label_attribute: String,
    pub partner_product: Selector,
    pub vendor: Selector,
    pub product: Selector,
    pub price: Selector,
}

impl SiteSelectors {
    pub fn compile(site: &SiteConfig) -> Result<Self> {
        Ok(Self {
            heading: parse_selector(&site.heading_selector)?,
            card_ancestor_depth: site.card_ancestor_depth,
            link: parse_selector(&site.link_selector)?,
            offer_row: parse_selector(&site.offer_row_selector)?,
            partner_label_attribute: site.partner_label_attribute.clone(),
            partner_product: parse_selector(&site.partner_product_selector)?,
            vendor: parse_selector(&site.vendor_selector)?,
            product: parse_selector(&site.product_selector)?,
            price: parse_selector(&site.price_selector)?,
        })
    }
}

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Trimmed text of the first descendant of `scope` matching `selector`, or an
/// empty string.
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
