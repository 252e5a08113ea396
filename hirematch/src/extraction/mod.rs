//! Skill, role and resume section extraction over raw document text.

mod role;
mod sections;
mod skills;

pub use role::{RoleClassifier, UNKNOWN_ROLE};
pub use sections::{keyword_line_filter, SectionExtractor, SectionKind};
pub use skills::SkillExtractor;
