mod cache;
mod provider;


pub use cache::EmbeddingCache;
pub use provider::{EmbeddingProvider, FastEmbedEncoder, TextEncoder};
