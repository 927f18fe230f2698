//! Error types and result aliases for the chat widget.
//!
//! This module defines the core error type [`WidgetError`] and the [`Result`] type alias
//! used throughout the crate. Backend calls fail with [`WidgetError::ApiError`] or
//! [`WidgetError::HttpError`]; the gate and controller fold those into the two
//! user-facing kinds, [`WidgetError::FormSubmissionError`] and
//! [`WidgetError::ChatExchangeError`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("User info submission failed: {0}")]
    FormSubmissionError(String),

    #[error("Chat exchange failed: {0}")]
    ChatExchangeError(String),

    #[error("API error: {endpoint} returned HTTP {status}")]
    ApiError { endpoint: String, status: u16 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WidgetError {
    /// True when the remote service answered, but with a non-success status.
    pub fn is_rejection(&self) -> bool {
        matches!(self, WidgetError::ApiError { .. })
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
