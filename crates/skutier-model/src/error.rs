use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("degenerate regression input: {0}")]
    DegenerateInput(String),

    #[error("sku {sku} has {observed} observations; the seasonal model needs at least {required}")]
    InsufficientHistory {
        sku: String,
        observed: usize,
        required: usize,
    },

    #[error("forecast failed for sku {sku}: {reason}")]
    ForecastFailed { sku: String, reason: String },

    #[error("token pattern error: {0}")]
    TokenPattern(#[from] regex::Error),
}
