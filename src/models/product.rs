use serde::{Deserialize, Serialize};

use crate::models::VendorOffer;

/// Label used when the search page has no product heading at all.
pub const NOT_FOUND_LABEL: &str = "not found";

/// The product a search term resolved to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductMatch {
    pub display_name: String,
    pub detail_link: String,
}

impl ProductMatch {
    pub fn new(display_name: impl Into<String>, detail_link: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            detail_link: detail_link.into(),
        }
    }

    /// Sentinel returned when the search page could not be fetched or understood.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Degenerate match for a search page without any product heading.
    pub fn not_found() -> Self {
        Self::new(NOT_FOUND_LABEL, "")
    }

    pub fn is_resolved(&self) -> bool {
        !self.display_name.is_empty() && !self.detail_link.is_empty()
    }
}

/// Response payload of one search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub product: ProductMatch,
    pub vendors: Vec<VendorOffer>,
}

impl SearchResult {
    pub fn new(product: ProductMatch, vendors: Vec<VendorOffer>) -> Self {
        Self { product, vendors }
    }
}
