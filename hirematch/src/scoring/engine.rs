use std::collections::BTreeSet;

use crate::config::ScoringConfig;

/// Fuses semantic similarity and skill overlap into one percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    weights: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(weights: ScoringConfig) -> Self {
        Self { weights }
    }

    /// Fraction of the job description's skills present in the resume, to 4 places.
    ///
    /// Always relative to the job description's skill count. Comparison is
    /// case-insensitive; either side empty scores 0.0.
    pub fn skill_match_score<R, J>(&self, resume_skills: R, jd_skills: J) -> f64
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        let resume = lowered(resume_skills);
        let jd = lowered(jd_skills);
        if resume.is_empty() || jd.is_empty() {
            return 0.0;
        }

        let matched = jd.intersection(&resume).count();
        round_to(matched as f64 / jd.len() as f64, 4)
    }

    /// `semantic * w_semantic + skill * w_skill` as a percentage with 2 decimals.
    pub fn calculate_final_score<R, J>(&self, semantic: f64, resume_skills: R, jd_skills: J) -> f64
    where
        R: IntoIterator,
        R::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        let skill = self.skill_match_score(resume_skills, jd_skills);
        self.fuse(semantic, skill)
    }

    /// Final percentage from an already computed skill score.
    pub fn fuse(&self, semantic: f64, skill: f64) -> f64 {
        let semantic = clamp_unit(semantic);
        let skill = clamp_unit(skill);
        let fused = semantic * self.weights.semantic_weight + skill * self.weights.skill_weight;
        round_to(fused * 100.0, 2).clamp(0.0, 100.0)
    }
}

/// Job description skills the resume covers, and those it lacks, both sorted.
pub fn skill_overlap(
    resume_skills: &BTreeSet<String>,
    jd_skills: &BTreeSet<String>,
) -> (Vec<String>, Vec<String>) {
    let resume = lowered(resume_skills);
    jd_skills
        .iter()
        .map(|s| s.to_lowercase())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .partition(|skill| resume.contains(skill))
}

fn lowered<I>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_full_match_scores_hundred() {
        let engine = ScoringEngine::default();
        let score = engine.calculate_final_score(1.0, ["python", "sql"], ["python", "sql"]);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_nothing_scores_zero() {
        let engine = ScoringEngine::default();
        assert_eq!(engine.calculate_final_score(0.0, NONE, ["python"]), 0.0);
    }

    #[test]
    fn test_empty_jd_skills_uses_semantic_only() {
        let engine = ScoringEngine::default();
        assert_eq!(engine.calculate_final_score(0.5, NONE, NONE), 30.0);
    }

    #[test]
    fn test_skill_ratio_is_relative_to_jd() {
        let engine = ScoringEngine::default();
        assert_eq!(
            engine.skill_match_score(["python", "sql", "extra"], ["python"]),
            1.0
        );
        assert_eq!(
            engine.skill_match_score(["python"], ["python", "sql", "extra"]),
            0.3333
        );
    }

    #[test]
    fn test_skill_match_is_case_insensitive() {
        let engine = ScoringEngine::default();
        assert_eq!(engine.skill_match_score(["Python"], ["PYTHON", "sql"]), 0.5);
    }

    #[test]
    fn test_reference_scenario() {
        let engine = ScoringEngine::default();
        let skill = engine.skill_match_score(["python", "sql"], ["python", "sql", "nlp"]);
        assert_eq!(skill, 0.6667);
        let score = engine.calculate_final_score(0.72, ["python", "sql"], ["python", "sql", "nlp"]);
        assert_eq!(score, 69.87);
    }

    #[test]
    fn test_semantic_is_clamped() {
        let engine = ScoringEngine::default();
        assert_eq!(engine.calculate_final_score(1.7, NONE, NONE), 60.0);
        assert_eq!(engine.calculate_final_score(-0.4, NONE, NONE), 0.0);
        assert_eq!(engine.calculate_final_score(f64::NAN, NONE, NONE), 0.0);
    }

    #[test]
    fn test_custom_weights() {
        let engine = ScoringEngine::new(ScoringConfig {
            semantic_weight: 0.5,
            skill_weight: 0.5,
        });
        assert_eq!(engine.calculate_final_score(0.8, ["sql"], ["sql", "nlp"]), 65.0);
    }

    #[test]
    fn test_skill_overlap_partitions_jd_skills() {
        let resume: BTreeSet<String> = ["python", "sql", "git"].iter().map(|s| s.to_string()).collect();
        let jd: BTreeSet<String> = ["nlp", "python", "sql"].iter().map(|s| s.to_string()).collect();
        let (matched, missing) = skill_overlap(&resume, &jd);
        assert_eq!(matched, vec!["python", "sql"]);
        assert_eq!(missing, vec!["nlp"]);
    }
}
