use serde::{Deserialize, Serialize};

use super::DocumentKind;
use crate::error::{MatchError, Result};

/// Text handed over by the document extractor, before any processing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawDocument {
    /// Originating filename, used as the document identity in results.
    pub filename: String,
    pub kind: DocumentKind,
    pub text: String,
}

impl RawDocument {
    /// Rejects documents with no usable text.
    pub fn new(filename: impl Into<String>, kind: DocumentKind, text: impl Into<String>) -> Result<Self> {
        let filename = filename.into();
        let text = text.into();
        if text.trim().is_empty() {
            return Err(MatchError::EmptyDocument(filename));
        }
        Ok(Self {
            filename,
            kind,
            text,
        })
    }

    pub fn resume(filename: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        Self::new(filename, DocumentKind::Resume, text)
    }

    pub fn job_description(filename: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        Self::new(filename, DocumentKind::JobDescription, text)
    }

    /// Filename without its extension.
    pub fn display_name(&self) -> &str {
        std::path::Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.filename)
    }
}
