use prediction_market::MarketError;
use std::convert::Infallible;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejections from the program core, kind preserved
    #[error("Program error: {0}")]
    Program(#[from] MarketError),

    /// Ledger file errors (corrupt contents, failed persist)
    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The program error kind, when this error came from the core.
    pub fn program_error(&self) -> Option<MarketError> {
        match self {
            AppError::Program(err) => Some(*err),
            _ => None,
        }
    }

    /// Numeric program error code, for receipts.
    pub fn error_code(&self) -> Option<u32> {
        self.program_error().map(MarketError::code)
    }

    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Program(err) => err.as_str(),
            AppError::Ledger(_) => "ledger",
            AppError::Io(_) => "io",
            AppError::Serialization(_) => "serialization",
            AppError::Validation(_) => "validation",
            AppError::Message(_) => "message",
        }
    }
}

impl From<Infallible> for AppError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}
