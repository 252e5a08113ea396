use std::sync::Arc;

use pretty_assertions::assert_eq;

mod common;
use common::{pipeline_with, FixedEncoder, KeywordEncoder};

use hirematch::extraction::UNKNOWN_ROLE;
use hirematch::models::{DocumentKind, JdRecord, RawDocument, ResultRecord, ResumeRecord};
use hirematch::processing::{ContentExtractor, ResumeInput};

const JD_TEXT: &str = "Looking for a Python Developer with SQL and NLP skills";
const JD_CLEAN: &str = "python developer sql nlp";

fn resume(name: &str, text: &str) -> ResumeInput {
    RawDocument::resume(name, text).unwrap().into()
}

#[tokio::test]
async fn test_python_developer_scenario() {
    // cos(jd, resume) = 0.72
    let encoder = FixedEncoder::new(&[
        (JD_CLEAN, vec![1.0, 0.0]),
        ("jane doe python sql project", vec![0.72, 0.693_974_1]),
    ]);
    let pipeline = pipeline_with(Arc::new(encoder));
    let jd = RawDocument::job_description("jd.txt", JD_TEXT).unwrap();

    let report = pipeline
        .run(&jd, vec![resume("jane.pdf", "Jane Doe\nPython SQL project")])
        .await;

    assert_eq!(report.jd.clean_text, JD_CLEAN);
    assert_eq!(report.jd.skills_csv(), "nlp,python,sql");
    assert_eq!(report.jd.role.as_deref(), Some("python developer"));
    assert!(report.failures.is_empty());

    let result = &report.results[0];
    assert_eq!(result.resume_id, "jane.pdf");
    assert_eq!(result.jd_id, "jd.txt");
    assert!((result.semantic_score - 0.72).abs() < 1e-5);
    assert_eq!(result.skill_score, 0.6667);
    assert_eq!(result.final_score, 69.87);
    assert_eq!(result.matched_skills, vec!["python", "sql"]);
    assert_eq!(result.missing_skills, vec!["nlp"]);
}

#[tokio::test]
async fn test_failed_extraction_is_isolated() {
    let pipeline = pipeline_with(Arc::new(KeywordEncoder::new(&[
        "python", "sql", "nlp", "developer",
    ])));
    let jd = RawDocument::job_description("jd.txt", JD_TEXT).unwrap();

    let broken = ContentExtractor::extract("scan.pdf", DocumentKind::Resume, b"not a pdf");
    let resumes = vec![
        resume("a.txt", "Python developer"),
        ResumeInput::from_extraction("scan.pdf", broken),
        resume("b.txt", "NLP and SQL"),
    ];

    let report = pipeline.run(&jd, resumes).await;

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].resume_id, "scan.pdf");
    assert!(report.failures[0].reason.contains("PDF extraction failed"));
}

#[tokio::test]
async fn test_model_failure_excludes_only_that_resume() {
    let encoder = Arc::new(FixedEncoder::new(&[
        (JD_CLEAN, vec![1.0, 0.0]),
        ("python developer", vec![1.0, 0.0]),
        ("sql nlp", vec![0.6, 0.8]),
    ]));
    let pipeline = pipeline_with(encoder.clone());
    let jd = RawDocument::job_description("jd.txt", JD_TEXT).unwrap();

    let report = pipeline
        .run(
            &jd,
            vec![
                resume("a.txt", "Python developer"),
                resume("odd.txt", "Unknown words here"),
                resume("b.txt", "SQL, NLP"),
            ],
        )
        .await;

    let ranked: Vec<&str> = report.results.iter().map(|r| r.resume_id.as_str()).collect();
    assert_eq!(ranked, vec!["a.txt", "b.txt"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].resume_id, "odd.txt");
    assert_eq!(report.failures[0].reason, "embedding unavailable");
    // JD, failed batch, then one retry per resume text
    assert_eq!(encoder.calls(), 5);
}

#[tokio::test]
async fn test_results_ranked_descending_and_ties_keep_input_order() {
    let pipeline = pipeline_with(Arc::new(KeywordEncoder::new(&[
        "python", "sql", "nlp", "developer", "chef",
    ])));
    let jd = RawDocument::job_description("jd.txt", JD_TEXT).unwrap();

    let report = pipeline
        .run(
            &jd,
            vec![
                resume("chef.txt", "Chef"),
                resume("first.txt", "Python SQL"),
                resume("best.txt", "Python developer, SQL and NLP"),
                resume("second.txt", "Python SQL"),
            ],
        )
        .await;

    let ranked: Vec<&str> = report.results.iter().map(|r| r.resume_id.as_str()).collect();
    assert_eq!(ranked, vec!["best.txt", "first.txt", "second.txt", "chef.txt"]);
    assert_eq!(report.best().map(|r| r.final_score), Some(100.0));
    assert!(report
        .results
        .windows(2)
        .all(|pair| pair[0].final_score >= pair[1].final_score));
}

#[tokio::test]
async fn test_jd_without_content_words_scores_zero() {
    let pipeline = pipeline_with(Arc::new(KeywordEncoder::new(&["python"])));
    let jd = RawDocument::job_description("jd.txt", "We are looking for you!").unwrap();

    let report = pipeline
        .run(&jd, vec![resume("a.txt", "Python developer")])
        .await;

    assert_eq!(report.jd.clean_text, "");
    assert_eq!(report.jd.role.as_deref(), Some(UNKNOWN_ROLE));
    assert_eq!(report.results[0].semantic_score, 0.0);
    assert_eq!(report.results[0].final_score, 0.0);
}

#[tokio::test]
async fn test_records_from_pipeline_output() {
    let pipeline = pipeline_with(Arc::new(KeywordEncoder::new(&["python", "sql"])));
    let jd = RawDocument::job_description("jd.txt", JD_TEXT).unwrap();
    let text = "Jane Doe\njane@example.com\nExperience: 3 years building Python and SQL services";

    let (report, profiles) = pipeline
        .run_with_profiles(&jd, vec![resume("jane.txt", text)])
        .await;

    let jd_record = JdRecord::new(&jd.text, &report.jd);
    assert_eq!(jd_record.skills, "nlp,python,sql");
    assert_eq!(jd_record.role, "python developer");

    let resume_record = ResumeRecord::new(&profiles[0], text.as_bytes().to_vec());
    assert_eq!(resume_record.filename, "jane.txt");
    assert_eq!(resume_record.skills, "python,sql");
    assert_eq!(resume_record.name.as_deref(), Some("Jane Doe"));
    assert_eq!(resume_record.email.as_deref(), Some("jane@example.com"));
    assert!(resume_record.experience.is_some());

    let result_record = ResultRecord::new(&report.results[0], &resume_record.id, &jd_record.id);
    assert_eq!(result_record.final_score, report.results[0].final_score);
    assert_eq!(result_record.resume_id, resume_record.id);
    assert_eq!(result_record.jd_id, jd_record.id);
}

#[tokio::test]
async fn test_same_file_name_records_stay_distinct() {
    let pipeline = pipeline_with(Arc::new(KeywordEncoder::new(&["python", "sql", "nlp"])));
    let jd = RawDocument::job_description("jd.txt", JD_TEXT).unwrap();

    let (report, profiles) = pipeline
        .run_with_profiles(
            &jd,
            vec![
                resume("cv.pdf", "Python, SQL and NLP"),
                resume("cv.pdf", "SQL"),
            ],
        )
        .await;

    let ids: Vec<&str> = report.results.iter().map(|r| r.resume_id.as_str()).collect();
    assert_eq!(ids, vec!["cv.pdf", "cv.pdf#2"]);

    let records: Vec<ResumeRecord> = profiles
        .iter()
        .map(|p| ResumeRecord::new(p, Vec::new()))
        .collect();
    assert_eq!(records[0].filename, "cv.pdf");
    assert_eq!(records[1].filename, "cv.pdf#2");
    assert_eq!(records[1].skills, "sql");
}
