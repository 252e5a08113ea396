use std::collections::{HashMap, HashSet};

use crate::config::Config;
use crate::embeddings::EmbeddingProvider;
use crate::error::MatchError;
use crate::extraction::{RoleClassifier, SectionExtractor, SkillExtractor, UNKNOWN_ROLE};
use crate::models::{
    MatchFailure, MatchReport, MatchResult, RawDocument, ResumeProfile, TextProfile,
};
use crate::scoring::{batch_similarity, skill_overlap, ScoringEngine};
use crate::text::TextNormalizer;

/// A resume as it arrives from the extractor: usable text, or the reason there is none.
#[derive(Debug, Clone)]
pub enum ResumeInput {
    Extracted(RawDocument),
    Failed { resume_id: String, reason: String },
}

impl ResumeInput {
    pub fn from_extraction(resume_id: &str, result: crate::error::Result<RawDocument>) -> Self {
        match result {
            Ok(doc) => Self::Extracted(doc),
            Err(e) => Self::failed(resume_id, &e),
        }
    }

    pub fn failed(resume_id: &str, error: &MatchError) -> Self {
        Self::Failed {
            resume_id: resume_id.to_string(),
            reason: error.reason(),
        }
    }

    pub fn resume_id(&self) -> &str {
        match self {
            Self::Extracted(doc) => &doc.filename,
            Self::Failed { resume_id, .. } => resume_id,
        }
    }

    fn with_id(self, id: String) -> Self {
        match self {
            Self::Extracted(mut doc) => {
                doc.filename = id;
                Self::Extracted(doc)
            }
            Self::Failed { reason, .. } => Self::Failed {
                resume_id: id,
                reason,
            },
        }
    }
}

/// Makes identities unique, keeping order: repeats of `cv.pdf` become
/// `cv.pdf#2`, `cv.pdf#3`, skipping any suffix already taken.
pub fn unique_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
    let mut taken: HashSet<String> = ids.iter().cloned().collect();
    let mut seen: HashMap<String, usize> = HashMap::new();

    ids.into_iter()
        .map(|id| {
            let count = seen.entry(id.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                return id;
            }
            loop {
                let candidate = format!("{id}#{count}");
                if taken.insert(candidate.clone()) {
                    return candidate;
                }
                *count += 1;
            }
        })
        .collect()
}

impl From<RawDocument> for ResumeInput {
    fn from(doc: RawDocument) -> Self {
        Self::Extracted(doc)
    }
}

/// Runs one job description against a set of resumes.
///
/// JD profile first, then per-resume profiles, one batched embedding call,
/// batched similarity and finally per-resume scoring. A resume that fails
/// any stage is reported in `MatchReport::failures` and never aborts the rest.
#[derive(Clone)]
pub struct MatchPipeline {
    normalizer: TextNormalizer,
    skills: SkillExtractor,
    roles: RoleClassifier,
    embeddings: EmbeddingProvider,
    scoring: ScoringEngine,
}

impl MatchPipeline {
    pub fn new(config: &Config, embeddings: EmbeddingProvider) -> Self {
        Self {
            normalizer: TextNormalizer::new(&config.vocabulary.extra_stop_words),
            skills: SkillExtractor::new(&config.vocabulary.skills),
            roles: RoleClassifier::new(&config.vocabulary.roles),
            embeddings,
            scoring: ScoringEngine::new(config.scoring),
        }
    }

    /// Clean text, required skills and role of a job description.
    pub fn process_jd(&self, text: &str) -> TextProfile {
        if text.trim().is_empty() {
            return TextProfile {
                clean_text: String::new(),
                skills: Default::default(),
                role: Some(UNKNOWN_ROLE.to_string()),
            };
        }

        TextProfile {
            clean_text: self.normalizer.clean(text),
            skills: self.skills.extract_skills(text),
            role: Some(self.roles.extract_role(text)),
        }
    }

    /// Sections come from the raw text; skills and clean text as for a JD.
    pub fn process_resume(&self, doc: &RawDocument) -> ResumeProfile {
        ResumeProfile {
            resume_id: doc.filename.clone(),
            profile: TextProfile {
                clean_text: self.normalizer.clean(&doc.text),
                skills: self.skills.extract_skills(&doc.text),
                role: None,
            },
            sections: SectionExtractor::extract(&doc.text),
        }
    }

    pub async fn run(&self, jd: &RawDocument, resumes: Vec<ResumeInput>) -> MatchReport {
        let (report, _) = self.run_with_profiles(jd, resumes).await;
        report
    }

    /// Like [`run`](Self::run), also returning the resume profiles that were scored.
    pub async fn run_with_profiles(
        &self,
        jd: &RawDocument,
        resumes: Vec<ResumeInput>,
    ) -> (MatchReport, Vec<ResumeProfile>) {
        tracing::info!(
            "Matching {} resumes against {}",
            resumes.len(),
            jd.filename
        );

        let ids = unique_ids(resumes.iter().map(|r| r.resume_id().to_string()));
        let resumes: Vec<ResumeInput> = resumes
            .into_iter()
            .zip(ids)
            .map(|(input, id)| input.with_id(id))
            .collect();

        let jd_profile = self.process_jd(&jd.text);
        tracing::debug!(
            "JD role: {:?}, skills: {:?}",
            jd_profile.role,
            jd_profile.skills
        );

        let mut failures = Vec::new();
        let mut profiles = Vec::new();
        for input in resumes {
            match input {
                ResumeInput::Extracted(doc) => {
                    let profile = self.process_resume(&doc);
                    if profile.profile.clean_text.is_empty() {
                        failures.push(failure(
                            &profile.resume_id,
                            "no usable text after normalization",
                        ));
                    } else {
                        profiles.push(profile);
                    }
                }
                ResumeInput::Failed { resume_id, reason } => {
                    failures.push(failure(&resume_id, &reason));
                }
            }
        }

        let jd_vector = self.embeddings.embed(&jd_profile.clean_text).await;
        if jd_vector.is_none() {
            tracing::warn!(
                "No embedding for job description {}; semantic scores will be 0",
                jd.filename
            );
        }

        let clean_texts: Vec<String> = profiles
            .iter()
            .map(|p| p.profile.clean_text.clone())
            .collect();
        let vectors = self.embeddings.embed_batch(&clean_texts).await;
        let similarities = batch_similarity(&vectors, jd_vector.as_deref());

        let mut results = Vec::with_capacity(profiles.len());
        let mut scored = Vec::with_capacity(profiles.len());
        for (index, (profile, vector)) in profiles.into_iter().zip(&vectors).enumerate() {
            if vector.is_none() {
                failures.push(failure(&profile.resume_id, "embedding unavailable"));
                continue;
            }

            let semantic_score = similarities.get(index).copied().unwrap_or(0.0);
            let skill_score = self
                .scoring
                .skill_match_score(&profile.profile.skills, &jd_profile.skills);
            let final_score = self.scoring.fuse(semantic_score, skill_score);
            let (matched_skills, missing_skills) =
                skill_overlap(&profile.profile.skills, &jd_profile.skills);

            results.push(MatchResult {
                resume_id: profile.resume_id.clone(),
                jd_id: jd.filename.clone(),
                semantic_score,
                skill_score,
                final_score,
                matched_skills,
                missing_skills,
            });
            scored.push(profile);
        }

        results.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

        tracing::info!(
            "Scored {} resumes, {} excluded",
            results.len(),
            failures.len()
        );

        let report = MatchReport {
            jd_id: jd.filename.clone(),
            jd: jd_profile,
            results,
            failures,
        };
        (report, scored)
    }
}

fn failure(resume_id: &str, reason: &str) -> MatchFailure {
    tracing::warn!("Excluding resume {}: {}", resume_id, reason);
    MatchFailure {
        resume_id: resume_id.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{EmbeddingCache, TextEncoder};
    use crate::error::Result;
    use std::sync::Arc;

    /// One dimension per vocabulary word, counting occurrences.
    struct BagOfWords;

    const WORDS: &[&str] = &["python", "sql", "nlp", "developer", "chef", "kitchen"];

    impl TextEncoder for BagOfWords {
        fn encode(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    WORDS
                        .iter()
                        .map(|w| t.split_whitespace().filter(|tok| tok == w).count() as f32)
                        .collect()
                })
                .collect())
        }

        fn dimensions(&self) -> usize {
            WORDS.len()
        }
    }

    fn pipeline() -> MatchPipeline {
        let config = Config {
            embeddings: Default::default(),
            scoring: Default::default(),
            vocabulary: Default::default(),
        };
        let embeddings =
            EmbeddingProvider::with_encoder(Arc::new(BagOfWords), EmbeddingCache::new(32));
        MatchPipeline::new(&config, embeddings)
    }

    #[test]
    fn test_process_jd() {
        let profile =
            pipeline().process_jd("Looking for a Python Developer with SQL and NLP skills");
        assert_eq!(profile.clean_text, "python developer sql nlp");
        assert_eq!(profile.skills_csv(), "nlp,python,sql");
        assert_eq!(profile.role.as_deref(), Some("python developer"));
    }

    #[test]
    fn test_process_empty_jd() {
        let profile = pipeline().process_jd("   ");
        assert_eq!(profile.clean_text, "");
        assert!(profile.skills.is_empty());
        assert_eq!(profile.role.as_deref(), Some(UNKNOWN_ROLE));
    }

    #[test]
    fn test_process_resume_keeps_raw_sections() {
        let doc = RawDocument::resume(
            "jane.txt",
            "Jane Doe\njane@example.com\nBuilt a Python project",
        )
        .unwrap();
        let resume = pipeline().process_resume(&doc);
        assert_eq!(resume.resume_id, "jane.txt");
        assert_eq!(resume.sections.name.as_deref(), Some("Jane Doe"));
        assert_eq!(resume.sections.email.as_deref(), Some("jane@example.com"));
        assert!(resume.profile.skills.contains("python"));
        assert!(resume.profile.role.is_none());
    }

    #[test]
    fn test_unique_ids() {
        assert_eq!(
            unique_ids(["cv.pdf", "a.txt", "cv.pdf", "cv.pdf#2", "cv.pdf"]),
            vec!["cv.pdf", "a.txt", "cv.pdf#3", "cv.pdf#2", "cv.pdf#4"]
        );
        assert!(unique_ids(Vec::<String>::new()).is_empty());
    }

    #[tokio::test]
    async fn test_run_keeps_same_named_resumes_apart() {
        let pipeline = pipeline();
        let jd = RawDocument::job_description("jd.txt", "Python developer, SQL").unwrap();
        let resumes = vec![
            RawDocument::resume("cv.pdf", "Python developer with SQL").unwrap().into(),
            RawDocument::resume("cv.pdf", "Head chef, busy kitchen").unwrap().into(),
            ResumeInput::Failed {
                resume_id: "cv.pdf".to_string(),
                reason: "no usable text".to_string(),
            },
        ];

        let report = pipeline.run(&jd, resumes).await;

        let ranked: Vec<&str> = report.results.iter().map(|r| r.resume_id.as_str()).collect();
        assert_eq!(ranked, vec!["cv.pdf", "cv.pdf#2"]);
        assert_eq!(report.results[0].final_score, 100.0);
        assert_eq!(report.results[1].final_score, 0.0);
        assert_eq!(report.failures[0].resume_id, "cv.pdf#3");
    }

    #[tokio::test]
    async fn test_run_ranks_and_reports_failures() {
        let pipeline = pipeline();
        let jd = RawDocument::job_description("jd.txt", "Python developer, SQL").unwrap();
        let resumes = vec![
            RawDocument::resume("chef.txt", "Head chef, busy kitchen").unwrap().into(),
            RawDocument::resume("dev.txt", "Python developer with SQL").unwrap().into(),
            ResumeInput::Failed {
                resume_id: "scan.pdf".to_string(),
                reason: "no usable text".to_string(),
            },
            RawDocument::resume("digits.txt", "12345 ---- 678").unwrap().into(),
        ];

        let report = pipeline.run(&jd, resumes).await;

        let ranked: Vec<&str> = report.results.iter().map(|r| r.resume_id.as_str()).collect();
        assert_eq!(ranked, vec!["dev.txt", "chef.txt"]);
        assert_eq!(report.results[0].final_score, 100.0);
        assert_eq!(report.results[1].final_score, 0.0);
        assert_eq!(report.results[1].missing_skills, vec!["python", "sql"]);

        let failed: Vec<&str> = report.failures.iter().map(|f| f.resume_id.as_str()).collect();
        assert_eq!(failed, vec!["scan.pdf", "digits.txt"]);
        assert_eq!(report.failures[1].reason, "no usable text after normalization");
    }
}
