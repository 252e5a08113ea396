use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::cache::EmbeddingCache;
use crate::config::EmbeddingsConfig;
use crate::error::{MatchError, Result};

/// Blocking text-to-vector model call.
///
/// Implementations are invoked on the blocking thread pool and may use
/// whatever internal parallelism the model offers.
pub trait TextEncoder: Send + Sync {
    fn encode(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>>;

    fn dimensions(&self) -> usize;
}

/// Local sentence-embedding model backed by fastembed (ONNX Runtime).
pub struct FastEmbedEncoder {
    model: Mutex<TextEmbedding>,
    batch_size: usize,
    dimensions: usize,
}

impl FastEmbedEncoder {
    pub fn new(config: &EmbeddingsConfig) -> Result<Self> {
        let embedding_model = resolve_embedding_model(&config.model);
        let model = TextEmbedding::try_new(
            InitOptions::new(embedding_model)
                .with_cache_dir(PathBuf::from(&config.cache_dir))
                .with_show_download_progress(true),
        )
        .map_err(|e| MatchError::Embedding(e.to_string()))?;

        Ok(Self {
            model: Mutex::new(model),
            batch_size: config.batch_size.max(1),
            dimensions: config.dimensions,
        })
    }
}

impl TextEncoder for FastEmbedEncoder {
    fn encode(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let mut model = self
            .model
            .lock()
            .map_err(|e| MatchError::Embedding(format!("Embedding model lock poisoned: {e}")))?;
        model
            .embed(texts, Some(self.batch_size))
            .map_err(|e| MatchError::Embedding(e.to_string()))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Maps clean text to embedding vectors, memoizing by exact text.
///
/// Model failures never escape: they are logged and surface as `None` for
/// the affected item only.
#[derive(Clone)]
pub struct EmbeddingProvider {
    encoder: Arc<dyn TextEncoder>,
    cache: EmbeddingCache,
}

impl EmbeddingProvider {
    /// Load the configured local model.
    pub fn new(config: &EmbeddingsConfig) -> Result<Self> {
        let encoder = FastEmbedEncoder::new(config)?;
        Ok(Self::with_encoder(
            Arc::new(encoder),
            EmbeddingCache::new(config.cache_capacity),
        ))
    }

    pub fn with_encoder(encoder: Arc<dyn TextEncoder>, cache: EmbeddingCache) -> Self {
        Self { encoder, cache }
    }

    pub fn dimensions(&self) -> usize {
        self.encoder.dimensions()
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }

    /// Embed one text. Empty text or a model failure yields `None`.
    pub async fn embed(&self, text: &str) -> Option<Vec<f32>> {
        if text.trim().is_empty() {
            return None;
        }
        if let Some(hit) = self.cache.get(text) {
            return Some(hit);
        }

        match self.encode(vec![text.to_string()]).await {
            Ok(mut vectors) if vectors.len() == 1 => {
                let vector = vectors.remove(0);
                self.cache.put(text.to_string(), vector.clone());
                Some(vector)
            }
            Ok(vectors) => {
                tracing::warn!(
                    "Embedding model returned {} vectors for a single text",
                    vectors.len()
                );
                None
            }
            Err(e) => {
                tracing::warn!("Embedding failed: {}", e);
                None
            }
        }
    }

    /// Embed many texts with one model call, preserving input order.
    ///
    /// Entries are `None` for empty texts and for texts the model could not
    /// embed. If the batched call fails, the uncached texts are retried one
    /// at a time so a single bad input does not discard the whole batch.
    pub async fn embed_batch(&self, texts: &[String]) -> Vec<Option<Vec<f32>>> {
        let mut resolved: HashMap<String, Vec<f32>> = HashMap::new();
        let mut pending: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for text in texts {
            if text.trim().is_empty() || !seen.insert(text.as_str()) {
                continue;
            }
            match self.cache.get(text) {
                Some(hit) => {
                    resolved.insert(text.clone(), hit);
                }
                None => pending.push(text.clone()),
            }
        }

        if !pending.is_empty() {
            tracing::debug!(
                "Embedding {} uncached texts ({} requested)",
                pending.len(),
                texts.len()
            );
            match self.encode(pending.clone()).await {
                Ok(vectors) if vectors.len() == pending.len() => {
                    for (text, vector) in pending.into_iter().zip(vectors) {
                        self.cache.put(text.clone(), vector.clone());
                        resolved.insert(text, vector);
                    }
                }
                Ok(vectors) => {
                    tracing::warn!(
                        "Embedding model returned {} vectors for {} texts; retrying individually",
                        vectors.len(),
                        pending.len()
                    );
                    self.embed_individually(pending, &mut resolved).await;
                }
                Err(e) => {
                    tracing::warn!("Batch embedding failed: {}; retrying individually", e);
                    self.embed_individually(pending, &mut resolved).await;
                }
            }
        }

        texts
            .iter()
            .map(|text| resolved.get(text).cloned())
            .collect()
    }

    async fn embed_individually(&self, texts: Vec<String>, resolved: &mut HashMap<String, Vec<f32>>) {
        for text in texts {
            if let Some(vector) = self.embed(&text).await {
                resolved.insert(text, vector);
            }
        }
    }

    async fn encode(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let encoder = Arc::clone(&self.encoder);
        tokio::task::spawn_blocking(move || encoder.encode(texts))
            .await
            .map_err(|e| MatchError::Embedding(format!("Embedding worker failed: {e}")))?
    }
}

fn resolve_embedding_model(model_name: &str) -> EmbeddingModel {
    match model_name {
        "all-MiniLM-L6-v2" | "sentence-transformers/all-MiniLM-L6-v2" => {
            EmbeddingModel::AllMiniLML6V2
        }
        "all-MiniLM-L12-v2" | "sentence-transformers/all-MiniLM-L12-v2" => {
            EmbeddingModel::AllMiniLML12V2
        }
        "BAAI/bge-small-en-v1.5" | "bge-small-en-v1.5" => EmbeddingModel::BGESmallENV15,
        "BAAI/bge-base-en-v1.5" | "bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
        "BAAI/bge-large-en-v1.5" | "bge-large-en-v1.5" => EmbeddingModel::BGELargeENV15,
        "nomic-embed-text-v1.5" | "nomic-ai/nomic-embed-text-v1.5" => {
            EmbeddingModel::NomicEmbedTextV15
        }
        other => {
            tracing::warn!("Unknown embedding model '{}', using all-MiniLM-L6-v2", other);
            EmbeddingModel::AllMiniLML6V2
        }
    }
}
