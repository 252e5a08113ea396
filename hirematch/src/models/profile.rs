use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Normalized view of one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextProfile {
    pub clean_text: String,
    /// Lower-cased vocabulary terms found in the raw text.
    pub skills: BTreeSet<String>,
    /// Set for job descriptions only.
    pub role: Option<String>,
}

impl TextProfile {
    pub fn skills_csv(&self) -> String {
        self.skills.iter().cloned().collect::<Vec<_>>().join(",")
    }
}

/// Heuristically recovered resume sections. Every field is independently optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SectionBundle {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub projects: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeProfile {
    pub resume_id: String,
    pub profile: TextProfile,
    pub sections: SectionBundle,
}
