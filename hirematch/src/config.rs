use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::error::{MatchError, Result};

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse a comma-separated env var into trimmed, lower-cased, non-empty entries.
/// Order is preserved since role patterns are first-match-wins.
fn parse_env_list(var: &str) -> Option<Vec<String>> {
    match env::var(var) {
        Ok(val) if !val.trim().is_empty() => Some(
            val.split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

pub const DEFAULT_SKILL_VOCABULARY: &[&str] = &[
    "python",
    "sql",
    "mysql",
    "nlp",
    "machine learning",
    "ml",
    "deep learning",
    "pandas",
    "numpy",
    "matplotlib",
    "seaborn",
    "statistics",
    "probability",
    "data analysis",
    "nltk",
    "tensorflow",
    "pytorch",
    "communication",
    "problem solving",
];

pub const DEFAULT_ROLE_PATTERNS: &[&str] = &[
    "data analyst",
    "nlp engineer",
    "machine learning engineer",
    "ai engineer",
    "python developer",
    "data scientist",
    "intern",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub embeddings: EmbeddingsConfig,
    pub scoring: ScoringConfig,
    pub vocabulary: VocabularyConfig,
}

#[derive(Debug, Clone)]
pub struct EmbeddingsConfig {
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
    /// Maximum number of distinct texts kept in the embedding cache.
    pub cache_capacity: usize,
    pub cache_dir: String,
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
            batch_size: 16,
            cache_capacity: 1024,
            cache_dir: ".fastembed_cache".to_string(),
        }
    }
}

/// Linear fusion weights for the final score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub semantic_weight: f64,
    pub skill_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            semantic_weight: 0.60,
            skill_weight: 0.40,
        }
    }
}

/// Static data the extractors are parameterized over.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    pub skills: Vec<String>,
    /// Ordered; earlier patterns win ties.
    pub roles: Vec<String>,
    pub extra_stop_words: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            skills: DEFAULT_SKILL_VOCABULARY
                .iter()
                .map(|s| s.to_string())
                .collect(),
            roles: DEFAULT_ROLE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            extra_stop_words: Vec::new(),
        }
    }
}

impl VocabularyConfig {
    /// Load vocabulary data from a JSON file. Missing keys fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let vocabulary: Self = serde_json::from_str(&raw)?;
        if vocabulary.skills.is_empty() {
            return Err(MatchError::Config(format!(
                "Vocabulary file {} has an empty skill list",
                path.display()
            )));
        }
        Ok(vocabulary)
    }

    fn from_env() -> Self {
        let mut vocabulary = match env::var("VOCABULARY_FILE") {
            Ok(path) if !path.is_empty() => match Self::from_file(&path) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!("Failed to load VOCABULARY_FILE '{}': {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        if let Some(skills) = parse_env_list("SKILL_VOCABULARY") {
            vocabulary.skills = skills;
        }
        if let Some(roles) = parse_env_list("ROLE_PATTERNS") {
            vocabulary.roles = roles;
        }
        if let Some(extra) = parse_env_list("EXTRA_STOP_WORDS") {
            vocabulary.extra_stop_words = extra;
        }
        vocabulary
    }
}

impl Default for Config {
    fn default() -> Self {
        let embedding_defaults = EmbeddingsConfig::default();
        let scoring_defaults = ScoringConfig::default();
        Self {
            embeddings: EmbeddingsConfig {
                model: env::var("EMBEDDING_MODEL").unwrap_or(embedding_defaults.model),
                dimensions: parse_env_or("EMBEDDING_DIMENSIONS", embedding_defaults.dimensions),
                batch_size: parse_env_or("EMBEDDING_BATCH_SIZE", embedding_defaults.batch_size),
                cache_capacity: parse_env_or(
                    "EMBEDDING_CACHE_SIZE",
                    embedding_defaults.cache_capacity,
                ),
                cache_dir: env::var("EMBEDDING_CACHE_DIR").unwrap_or(embedding_defaults.cache_dir),
            },
            scoring: ScoringConfig {
                semantic_weight: parse_env_or(
                    "SCORE_SEMANTIC_WEIGHT",
                    scoring_defaults.semantic_weight,
                ),
                skill_weight: parse_env_or("SCORE_SKILL_WEIGHT", scoring_defaults.skill_weight),
            },
            vocabulary: VocabularyConfig::from_env(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
