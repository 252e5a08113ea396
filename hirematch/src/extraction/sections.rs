//! Best-effort resume section extraction.
//!
//! Works on the raw text: normalization destroys the capitalization and line
//! structure these heuristics rely on.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::SectionBundle;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email pattern")
});
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\s\-]{7,}\d").expect("valid phone pattern"));
static NON_LETTER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z\s]").expect("valid letter pattern"));

/// Name candidates are only looked for this far down the document.
const NAME_SCAN_LINES: usize = 5;
const MAX_NAME_WORDS: usize = 4;

/// Sections recovered with a keyword line filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Education,
    Experience,
    Projects,
}

impl SectionKind {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SectionKind::Education => &[
                "bachelor",
                "b.tech",
                "btech",
                "ba",
                "bs",
                "master",
                "m.tech",
                "mtech",
                "msc",
                "degree",
                "university",
                "college",
                "school",
                "graduation",
            ],
            SectionKind::Experience => {
                &["experience", "intern", "worked", "project", "role", "position"]
            }
            SectionKind::Projects => &["project", "developed", "built", "created"],
        }
    }
}

pub struct SectionExtractor;

impl SectionExtractor {
    pub fn extract(text: &str) -> SectionBundle {
        SectionBundle {
            name: Self::extract_name(text),
            email: Self::extract_email(text),
            phone: Self::extract_phone(text),
            education: Self::extract_section(text, SectionKind::Education),
            experience: Self::extract_section(text, SectionKind::Experience),
            projects: Self::extract_section(text, SectionKind::Projects),
        }
    }

    /// First of the top lines that still has one to four words once symbols
    /// are stripped, title-cased.
    pub fn extract_name(text: &str) -> Option<String> {
        text.lines().take(NAME_SCAN_LINES).find_map(|line| {
            let letters = NON_LETTER_PATTERN.replace_all(line.trim(), "");
            let words: Vec<&str> = letters.split_whitespace().collect();
            if (1..=MAX_NAME_WORDS).contains(&words.len()) {
                Some(
                    words
                        .iter()
                        .map(|w| title_case(w))
                        .collect::<Vec<_>>()
                        .join(" "),
                )
            } else {
                None
            }
        })
    }

    pub fn extract_email(text: &str) -> Option<String> {
        EMAIL_PATTERN.find(text).map(|m| m.as_str().to_string())
    }

    pub fn extract_phone(text: &str) -> Option<String> {
        PHONE_PATTERN.find(text).map(|m| m.as_str().to_string())
    }

    pub fn extract_education(text: &str) -> Option<String> {
        Self::extract_section(text, SectionKind::Education)
    }

    pub fn extract_experience(text: &str) -> Option<String> {
        Self::extract_section(text, SectionKind::Experience)
    }

    pub fn extract_projects(text: &str) -> Option<String> {
        Self::extract_section(text, SectionKind::Projects)
    }

    pub fn extract_section(text: &str, kind: SectionKind) -> Option<String> {
        keyword_line_filter(text, kind.keywords())
    }
}

/// Lower-cased lines containing any of `keywords`, joined with a single space.
pub fn keyword_line_filter(text: &str, keywords: &[&str]) -> Option<String> {
    let matches: Vec<String> = text
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| keywords.iter().any(|k| line.contains(k)))
        .collect();

    if matches.is_empty() {
        None
    } else {
        Some(matches.join(" "))
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}
