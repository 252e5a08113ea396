//! Resume to job description matching.
//!
//! Documents are normalized, mined for skills, role and resume sections,
//! embedded with a local sentence model and scored by a weighted fusion of
//! semantic similarity and skill coverage.

pub mod config;
pub mod embeddings;
pub mod error;
pub mod extraction;
pub mod models;
pub mod processing;
pub mod scoring;
pub mod text;

pub use config::Config;
pub use error::{MatchError, Result};
pub use processing::{ContentExtractor, MatchPipeline, ResumeInput};
