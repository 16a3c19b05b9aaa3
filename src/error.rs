use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Expected exactly 3 answers, got {0}")]
    InvalidAnswerCount(usize),

    #[error("Completion API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Model returned an empty completion")]
    EmptyCompletion,

    #[error("Tabular store error: {0}")]
    Store(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[cfg(feature = "openai")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
