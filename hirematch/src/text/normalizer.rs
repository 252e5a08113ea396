use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::lemmatizer::lemmatize;
use super::stopwords::{DOMAIN_NOISE_WORDS, ENGLISH_STOP_WORDS};

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+|www\S+").expect("valid url pattern"));
static NON_ALPHA_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z\s]").expect("valid non-alpha pattern"));

/// Produces the clean text used for embeddings and token comparison.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stop_words: HashSet<String>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl TextNormalizer {
    /// Build a normalizer over the English and domain stop words plus `extra`.
    pub fn new(extra_stop_words: &[String]) -> Self {
        let stop_words = ENGLISH_STOP_WORDS
            .iter()
            .chain(DOMAIN_NOISE_WORDS.iter())
            .map(|w| w.to_string())
            .chain(extra_stop_words.iter().map(|w| w.trim().to_lowercase()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { stop_words }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Lowercase, strip URLs and non-letters, drop stop words, lemmatize.
    ///
    /// Never fails: empty or unusable input yields an empty string.
    pub fn clean(&self, text: &str) -> String {
        self.tokenize(text).join(" ")
    }

    pub fn clean_optional(&self, text: Option<&str>) -> String {
        text.map(|t| self.clean(t)).unwrap_or_default()
    }

    /// Same pipeline as [`clean`](Self::clean), returning the tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let without_urls = URL_PATTERN.replace_all(&lowered, " ");
        let letters_only = NON_ALPHA_PATTERN.replace_all(&without_urls, " ");

        letters_only
            .split_whitespace()
            .filter(|word| !self.is_stop_word(word))
            .map(lemmatize)
            .collect()
    }
}
