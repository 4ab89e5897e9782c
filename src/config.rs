use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use url::Url;

use crate::selectors::SiteSelectors;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub scraper: ScraperConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Per-fetch timeout in seconds.
    pub request_timeout: u64,
    pub user_agent: String,
    pub max_redirects: usize,
    /// Offer rows considered per detail page, see `extractor::rows_to_inspect`.
    pub offer_limit: usize,
}

/// Everything coupled to the comparison site's current markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub base_url: String,
    pub search_path: String,
    pub search_param: String,

    // Search results page
    pub heading_selector: String,
    pub card_ancestor_depth: usize,
    pub link_selector: String,

    // Product detail page
    pub offer_row_selector: String,
    pub partner_label_attribute: String,
    pub partner_product_selector: String,
    pub vendor_selector: String,
    pub product_selector: String,
    pub price_selector: String,

    // Price text
    pub price_prefix: String,
    pub currency_suffix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            request_timeout: 15,
            user_agent: concat!("offer-finder/", env!("CARGO_PKG_VERSION")).to_string(),
            max_redirects: 10,
            offer_limit: 10,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.pricerunner.se".to_string(),
            search_path: "/results".to_string(),
            search_param: "q".to_string(),
            heading_selector: "h3".to_string(),
            card_ancestor_depth: 5,
            link_selector: "a[href]".to_string(),
            offer_row_selector: "#product-body > div.FKse_kiJXC > div > div.vQOkVLmS99.JpHTC3gnJ6 \
                > div.MFbHUJ3qvl > div > div > div.EUXXvl3ByR.css-19thj06 > div"
                .to_string(),
            partner_label_attribute: "aria-label".to_string(),
            partner_product_selector: "div.Rj1ZIdJtHj.LfnWqDQEC_.css-qt1ys4 > p".to_string(),
            vendor_selector:
                "p.SnarOLmYcb.QTqr3FhD08.CMnSARKXkC.eSiwcTiHBc.qzyF__rcJz.css-ai0pqp".to_string(),
            product_selector:
                "p.SnarOLmYcb.J0LD8ZkjaI.vi8fZFqHqP.eSiwcTiHBc.RM90jzC6co.css-ai0pqp".to_string(),
            price_selector: "div.css-guoxna > span".to_string(),
            price_prefix: "fr.".to_string(),
            currency_suffix: "kr".to_string(),
        }
    }
}

impl AppConfig {
    /// Layers built-in defaults, `config/*.toml`, an optional extra file and
    /// `OFFER_FINDER__SECTION__KEY` environment variables.
    pub fn load(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let s = builder
            .add_source(Environment::with_prefix("OFFER_FINDER").separator("__"))
            .build()?;

        let config: AppConfig = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port must be greater than 0".into()));
        }

        if self.scraper.request_timeout == 0 {
            return Err(ConfigError::Message("Scraper request_timeout must be greater than 0".into()));
        }

        if self.scraper.offer_limit == 0 {
            return Err(ConfigError::Message("Scraper offer_limit must be greater than 0".into()));
        }

        if Url::parse(&self.site.base_url).is_err() {
            return Err(ConfigError::Message("Invalid site base_url format".into()));
        }

        if !self.site.search_path.starts_with('/') {
            return Err(ConfigError::Message("Site search_path must start with '/'".into()));
        }

        if self.site.search_param.trim().is_empty() {
            return Err(ConfigError::Message("Site search_param must not be empty".into()));
        }

        if self.site.card_ancestor_depth == 0 {
            return Err(ConfigError::Message("Site card_ancestor_depth must be greater than 0".into()));
        }

        if self.site.partner_label_attribute.trim().is_empty() {
            return Err(ConfigError::Message("Site partner_label_attribute must not be empty".into()));
        }

        SiteSelectors::compile(&self.site).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(())
    }
}
