use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("GitHub API error: {}", .0.as_u16())]
    ApiError(StatusCode),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Form relay error: {}", .0.as_u16())]
    RelayError(StatusCode),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
