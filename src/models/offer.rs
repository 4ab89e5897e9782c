use serde::{Deserialize, Serialize};

use crate::models::generate_id;

/// One vendor's offer for the resolved product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VendorOffer {
    pub vendor_name: String,
    #[serde(rename = "offerID")]
    pub offer_id: String,
    pub offered_product_label: String,
    /// Whole currency units.
    pub price: i64,
}

impl VendorOffer {
    /// Builds an offer with a freshly generated `offer_id`.
    pub fn new(
        vendor_name: impl Into<String>,
        offered_product_label: impl Into<String>,
        price: i64,
    ) -> Self {
        Self {
            vendor_name: vendor_name.into(),
            offer_id: generate_id(),
            offered_product_label: offered_product_label.into(),
            price,
        }
    }

    /// Equality ignoring the generated identifier.
    pub fn same_offer(&self, other: &VendorOffer) -> bool {
        self.vendor_name == other.vendor_name
            && self.offered_product_label == other.offered_product_label
            && self.price == other.price
    }
}
