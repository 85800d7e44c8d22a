use thiserror::Error;

pub type Result<T> = std::result::Result<T, MailchimpError>;

#[derive(Debug, Error)]
pub enum MailchimpError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}
