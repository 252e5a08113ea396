use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hirematch::config::Config;
use hirematch::embeddings::EmbeddingProvider;
use hirematch::error::MatchError;
use hirematch::models::{
    DocumentKind, JdRecord, MatchReport, RawDocument, ResultRecord, ResumeProfile, ResumeRecord,
};
use hirematch::processing::{
    unique_ids, validate_resume_file, ContentExtractor, MatchPipeline, ResumeInput,
};

#[derive(Parser)]
#[command(name = "hirematch")]
#[command(about = "Rank resumes against a job description")]
struct Args {
    /// Job description file (pdf, docx, txt); `-` reads plain text from stdin
    #[arg(long, required_unless_present = "jd_text", conflicts_with = "jd_text")]
    jd: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    jd_text: Option<String>,

    /// Resume files (pdf, docx, txt)
    #[arg(required = true)]
    resumes: Vec<PathBuf>,

    /// Print the full report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Write job description, resume and result records to this JSON file
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Serialize)]
struct RecordExport {
    jd: JdRecord,
    resumes: Vec<ResumeRecord>,
    results: Vec<ResultRecord>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hirematch=info".into());
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let config = Config::from_env();

    let jd = load_jd(&args)?;

    let mut filedata: HashMap<String, Vec<u8>> = HashMap::new();
    let ids = unique_ids(args.resumes.iter().map(|path| file_name(path)));
    let mut inputs = Vec::with_capacity(args.resumes.len());
    for (path, id) in args.resumes.iter().zip(ids) {
        let filename = file_name(path);
        if !validate_resume_file(&filename) {
            inputs.push(ResumeInput::failed(
                &id,
                &MatchError::UnsupportedFormat(filename),
            ));
            continue;
        }
        let input = match std::fs::read(path) {
            Ok(bytes) => {
                let extracted = ContentExtractor::extract(&filename, DocumentKind::Resume, &bytes)
                    .map(|mut doc| {
                        doc.filename = id.clone();
                        doc
                    });
                if args.export.is_some() {
                    filedata.insert(id.clone(), bytes);
                }
                ResumeInput::from_extraction(&id, extracted)
            }
            Err(e) => ResumeInput::failed(&id, &MatchError::Io(e)),
        };
        inputs.push(input);
    }

    tracing::info!("Loading embedding model: {}...", config.embeddings.model);
    let embeddings = EmbeddingProvider::new(&config.embeddings)?;
    let pipeline = MatchPipeline::new(&config, embeddings);

    let (report, profiles) = pipeline.run_with_profiles(&jd, inputs).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }
    for failure in &report.failures {
        eprintln!("skipped {}: {}", failure.resume_id, failure.reason);
    }

    if let Some(path) = &args.export {
        let export = build_export(&jd, &report, &profiles, &mut filedata);
        std::fs::write(path, serde_json::to_vec_pretty(&export)?)?;
        tracing::info!("Wrote records to {}", path.display());
    }

    Ok(())
}

fn load_jd(args: &Args) -> anyhow::Result<RawDocument> {
    if let Some(text) = &args.jd_text {
        return Ok(RawDocument::job_description("jd", text.as_str())?);
    }

    match args.jd.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(RawDocument::job_description("stdin", text)?)
        }
        Some(path) => Ok(ContentExtractor::extract_file(
            path,
            DocumentKind::JobDescription,
        )?),
        None => Err(anyhow::anyhow!("either --jd or --jd-text is required")),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_table(report: &MatchReport) {
    println!(
        "Job description: {} (role: {}, skills: {})",
        report.jd_id,
        report.jd.role.as_deref().unwrap_or_default(),
        report.jd.skills_csv()
    );
    println!(
        "{:>4}  {:<32} {:>7} {:>9} {:>6}  missing",
        "rank", "resume", "final", "semantic", "skill"
    );
    for (rank, result) in report.results.iter().enumerate() {
        println!(
            "{:>4}  {:<32} {:>7.2} {:>9.4} {:>6.4}  {}",
            rank + 1,
            result.resume_id,
            result.final_score,
            result.semantic_score,
            result.skill_score,
            result.missing_skills.join(",")
        );
    }
}

fn build_export(
    jd: &RawDocument,
    report: &MatchReport,
    profiles: &[ResumeProfile],
    filedata: &mut HashMap<String, Vec<u8>>,
) -> RecordExport {
    let jd_record = JdRecord::new(&jd.text, &report.jd);

    let resumes: Vec<ResumeRecord> = profiles
        .iter()
        .map(|p| ResumeRecord::new(p, filedata.remove(&p.resume_id).unwrap_or_default()))
        .collect();
    let resume_ids: HashMap<&str, &str> = resumes
        .iter()
        .map(|r| (r.filename.as_str(), r.id.as_str()))
        .collect();

    let results = report
        .results
        .iter()
        .filter_map(|result| {
            resume_ids
                .get(result.resume_id.as_str())
                .map(|resume_ref| ResultRecord::new(result, resume_ref, &jd_record.id))
        })
        .collect();

    RecordExport {
        jd: jd_record,
        resumes,
        results,
    }
}
