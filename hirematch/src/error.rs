use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("No usable text in document: {0}")]
    EmptyDocument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MatchError {
    /// Short reason string reported back to callers for an excluded document.
    pub fn reason(&self) -> String {
        match self {
            MatchError::EmptyDocument(_) => "no usable text".to_string(),
            MatchError::UnsupportedFormat(ext) => format!("unsupported format: {ext}"),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
