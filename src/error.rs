use chromiumoxide::error::CdpError;
use sqlx::Error as SqlxError;
use std::time::Duration;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ScrapeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Browser error: {0}")]
    Browser(#[from] CdpError),

    #[error("Browser configuration error: {0}")]
    BrowserConfig(String),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("No element at index {index} for selector {selector}")]
    ElementMissing { selector: String, index: usize },

    #[error("Manual login not confirmed within {0:?}")]
    LoginTimeout(Duration),

    #[error("Operator signal closed before login was confirmed")]
    OperatorSignalClosed,
}
