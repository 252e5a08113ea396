//! Text normalization for embedding and token comparison.

mod lemmatizer;
mod normalizer;
mod stopwords;

pub use lemmatizer::lemmatize;
pub use normalizer::TextNormalizer;
pub use stopwords::{DOMAIN_NOISE_WORDS, ENGLISH_STOP_WORDS};
