use thiserror::Error;

pub type MixResult<T> = Result<T, MixboardError>;

#[derive(Error, Debug)]
pub enum MixboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Empty window: {0}")]
    EmptyWindow(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Insights generation error: {0}")]
    Insights(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
