#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hirematch::config::{Config, EmbeddingsConfig, ScoringConfig, VocabularyConfig};
use hirematch::embeddings::{EmbeddingCache, EmbeddingProvider, TextEncoder};
use hirematch::error::{MatchError, Result};
use hirematch::processing::MatchPipeline;

/// Returns preset vectors by exact clean text; any other text is a model error.
pub struct FixedEncoder {
    vectors: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl FixedEncoder {
    pub fn new(pairs: &[(&str, Vec<f32>)]) -> Self {
        Self {
            vectors: pairs
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.clone()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextEncoder for FixedEncoder {
    fn encode(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(text)
                    .cloned()
                    .ok_or_else(|| MatchError::Embedding(format!("no vector for '{text}'")))
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        self.vectors.values().next().map_or(0, Vec::len)
    }
}

/// Word-count vectors over a fixed vocabulary.
pub struct KeywordEncoder {
    words: Vec<&'static str>,
}

impl KeywordEncoder {
    pub fn new(words: &[&'static str]) -> Self {
        Self {
            words: words.to_vec(),
        }
    }
}

impl TextEncoder for KeywordEncoder {
    fn encode(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                self.words
                    .iter()
                    .map(|word| text.split_whitespace().filter(|t| t == word).count() as f32)
                    .collect()
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.words.len()
    }
}

pub fn test_config() -> Config {
    Config {
        embeddings: EmbeddingsConfig::default(),
        scoring: ScoringConfig::default(),
        vocabulary: VocabularyConfig::default(),
    }
}

pub fn pipeline_with(encoder: Arc<dyn TextEncoder>) -> MatchPipeline {
    let provider = EmbeddingProvider::with_encoder(encoder, EmbeddingCache::new(64));
    MatchPipeline::new(&test_config(), provider)
}
