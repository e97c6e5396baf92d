use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    ValidationError(String),
    ConfigurationError(String),
    UpstreamError { status: Option<u16>, body: String },
    InvalidGeneration(String),
    LimitExceeded(String),
    ParseError(String),
    ClipboardUnavailable(String),
    IoError(String),
}

impl AppError {
    /// The bare message without the variant prefix, as shown to end users.
    pub fn message(&self) -> String {
        match self {
            AppError::Internal(msg)
            | AppError::ValidationError(msg)
            | AppError::ConfigurationError(msg)
            | AppError::InvalidGeneration(msg)
            | AppError::LimitExceeded(msg)
            | AppError::ParseError(msg)
            | AppError::ClipboardUnavailable(msg)
            | AppError::IoError(msg) => msg.clone(),
            AppError::UpstreamError { status, body } => match status {
                Some(code) => format!("Gemini request failed: {} {}", code, body),
                None => format!("Gemini request failed: {}", body),
            },
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::UpstreamError { .. } => write!(f, "Upstream error: {}", self.message()),
            AppError::InvalidGeneration(msg) => write!(f, "Invalid generation: {}", msg),
            AppError::LimitExceeded(msg) => write!(f, "Limit exceeded: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::ClipboardUnavailable(msg) => write!(f, "Clipboard unavailable: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
