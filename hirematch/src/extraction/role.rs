use regex::Regex;

/// Returned when no role pattern matches.
pub const UNKNOWN_ROLE: &str = "unknown role";

/// Classifies a job description by the first matching role pattern.
#[derive(Debug, Clone)]
pub struct RoleClassifier {
    patterns: Vec<Regex>,
}

impl RoleClassifier {
    /// Patterns are regular expressions tried in the given order.
    /// A pattern that fails to compile is matched literally instead.
    pub fn new(patterns: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .filter_map(|p| match Regex::new(&p) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!("Invalid role pattern '{}': {}. Matching literally.", p, e);
                    Regex::new(&regex::escape(&p)).ok()
                }
            })
            .collect();
        Self { patterns }
    }

    /// First pattern (in list order) found in the lower-cased text wins.
    pub fn extract_role(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        self.patterns
            .iter()
            .find_map(|pattern| pattern.find(&lowered))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN_ROLE.to_string())
    }
}

impl Default for RoleClassifier {
    fn default() -> Self {
        let patterns: Vec<String> = crate::config::DEFAULT_ROLE_PATTERNS
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self::new(&patterns)
    }
}
