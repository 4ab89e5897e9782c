pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod finder;
pub mod models;
pub mod price;
pub mod resolver;
pub mod selectors;
pub mod utils;
pub mod web;

// Re-export commonly used types
pub use config::AppConfig;
pub use finder::PriceFinder;
pub use models::{ProductMatch, SearchResult, VendorOffer};
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
