use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Unexpected page structure: {0}")]
    StructureMismatch(String),

    #[error("Unparseable price text '{text}'")]
    PriceParse { text: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn structure(message: impl Into<String>) -> Self {
        AppError::StructureMismatch(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
