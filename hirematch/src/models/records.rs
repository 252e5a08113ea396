//! Row shapes handed to an external store. Nothing in this crate persists them.

use chrono::{DateTime, Utc};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};

use super::{MatchResult, ResumeProfile, TextProfile};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeRecord {
    pub id: String,
    pub filename: String,
    pub filedata: Vec<u8>,
    pub clean_text: String,
    /// Comma-joined skill list.
    pub skills: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub projects: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl ResumeRecord {
    pub fn new(resume: &ResumeProfile, filedata: Vec<u8>) -> Self {
        let sections = resume.sections.clone();
        Self {
            id: nanoid!(),
            filename: resume.resume_id.clone(),
            filedata,
            clean_text: resume.profile.clean_text.clone(),
            skills: resume.profile.skills_csv(),
            name: sections.name,
            email: sections.email,
            phone: sections.phone,
            education: sections.education,
            experience: sections.experience,
            projects: sections.projects,
            uploaded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JdRecord {
    pub id: String,
    pub raw_jd: String,
    pub clean_jd: String,
    pub skills: String,
    pub role: String,
    pub uploaded_at: DateTime<Utc>,
}

impl JdRecord {
    pub fn new(raw_jd: &str, jd: &TextProfile) -> Self {
        Self {
            id: nanoid!(),
            raw_jd: raw_jd.to_string(),
            clean_jd: jd.clean_text.clone(),
            skills: jd.skills_csv(),
            role: jd
                .role
                .clone()
                .unwrap_or_else(|| crate::extraction::UNKNOWN_ROLE.to_string()),
            uploaded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    pub id: String,
    pub resume_id: String,
    pub jd_id: String,
    pub semantic_score: f64,
    pub final_score: f64,
    pub created_at: DateTime<Utc>,
}

impl ResultRecord {
    /// `resume_ref` and `jd_ref` are the store's ids for the two documents.
    pub fn new(result: &MatchResult, resume_ref: &str, jd_ref: &str) -> Self {
        Self {
            id: nanoid!(),
            resume_id: resume_ref.to_string(),
            jd_id: jd_ref.to_string(),
            semantic_score: result.semantic_score,
            final_score: result.final_score,
            created_at: Utc::now(),
        }
    }
}
