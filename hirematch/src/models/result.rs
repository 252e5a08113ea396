use serde::{Deserialize, Serialize};

use super::TextProfile;

/// Score of one resume against one job description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub resume_id: String,
    pub jd_id: String,
    /// Clamped cosine similarity, 0 to 1.
    pub semantic_score: f64,
    /// Share of the job description's skills the resume covers, 0 to 1.
    pub skill_score: f64,
    /// Weighted fusion as a percentage, 0 to 100.
    pub final_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// A resume that was excluded from scoring, and why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchFailure {
    pub resume_id: String,
    pub reason: String,
}

/// Outcome of one match run: ranked results plus the resumes that could not be scored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    pub jd_id: String,
    pub jd: TextProfile,
    pub results: Vec<MatchResult>,
    pub failures: Vec<MatchFailure>,
}

impl MatchReport {
    pub fn best(&self) -> Option<&MatchResult> {
        self.results.first()
    }
}
