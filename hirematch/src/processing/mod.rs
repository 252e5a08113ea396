mod extractor;
mod pipeline;

pub use extractor::{detect_format, validate_jd_file, validate_resume_file, ContentExtractor};
pub use pipeline::{unique_ids, MatchPipeline, ResumeInput};
