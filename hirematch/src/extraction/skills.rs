use std::collections::BTreeSet;

/// Finds vocabulary skill terms in raw document text.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    vocabulary: Vec<String>,
}

impl SkillExtractor {
    /// Terms are lower-cased and de-duplicated; first occurrence keeps its position.
    pub fn new(vocabulary: &[String]) -> Self {
        let mut seen = BTreeSet::new();
        let vocabulary = vocabulary
            .iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty() && seen.insert(term.clone()))
            .collect();
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Case-insensitive substring scan of the raw (non-normalized) text.
    ///
    /// Multi-word terms match only as contiguous substrings.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        if text.trim().is_empty() {
            return BTreeSet::new();
        }

        let lowered = text.to_lowercase();
        self.vocabulary
            .iter()
            .filter(|term| lowered.contains(term.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for SkillExtractor {
    fn default() -> Self {
        let vocabulary: Vec<String> = crate::config::DEFAULT_SKILL_VOCABULARY
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self::new(&vocabulary)
    }
}
