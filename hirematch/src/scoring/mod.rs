//! Similarity and score fusion.

mod engine;
mod similarity;

pub use engine::{skill_overlap, ScoringEngine};
pub use similarity::{batch_similarity, similarity};
