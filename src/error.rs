//! Error types shared by the pricing, analysis and plotting layers.

use thiserror::Error;

/// Errors reported by the library.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Market inputs outside the domain of the model (non-positive spot or
    /// strike, negative volatility or time, non-finite values).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A parameter sweep that cannot be generated.
    #[error("Invalid sweep: {0}")]
    InvalidSweep(String),

    /// Chart rendering failed.
    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for library operations
pub type Result<T> = std::result::Result<T, PricingError>;

impl PricingError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        PricingError::InvalidInput(msg.into())
    }

    /// True for the invalid-input category.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PricingError::InvalidInput(_))
    }
}
