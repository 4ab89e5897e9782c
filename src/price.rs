use regex::Regex;
use std::sync::LazyLock;

use crate::config::SiteConfig;
use crate::utils::error::{AppError, Result};

/// Turns locale-formatted price text such as `"fr. 1 299 kr"` into whole
/// currency units.
#[derive(Debug, Clone)]
pub struct PriceNormalizer {
    price_regex: Regex,
}

impl PriceNormalizer {
    pub fn new(prefix: &str, currency_suffix: &str) -> Result<Self> {
        // Prefix and suffix are optional so already-normalized input round-trips.
        let pattern = format!(
            r"(?i)^\s*(?:{})?\s*(?P<amount>\d(?:[\d\s]*\d)?)\s*(?:{})?\s*$",
            regex::escape(prefix.trim()),
            regex::escape(currency_suffix.trim()),
        );

        Ok(Self {
            price_regex: Regex::new(&pattern)?,
        })
    }

    pub fn from_site(site: &SiteConfig) -> Result<Self> {
        Self::new(&site.price_prefix, &site.currency_suffix)
    }

    pub fn normalize(&self, text: &str) -> Result<i64> {
        let parse_error = || AppError::PriceParse {
            text: text.to_string(),
        };

        let captures = self.price_regex.captures(text).ok_or_else(parse_error)?;
        let digits: String = captures["amount"]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        digits.parse::<i64>().map_err(|_| parse_error())
    }
}

impl Default for PriceNormalizer {
    fn default() -> Self {
        let site = SiteConfig::default();
        Self::from_site(&site).expect("default price pattern is a valid regex")
    }
}

static DEFAULT_NORMALIZER: LazyLock<PriceNormalizer> = LazyLock::new(PriceNormalizer::default);

/// Normalizes with the default `fr.` prefix and `kr` suffix.
pub fn normalize_price(text: &str) -> Result<i64> {
    DEFAULT_NORMALIZER.normalize(text)
}
