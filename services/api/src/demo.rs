use crate::export::write_ranking;
use crate::infra::summary_lines;
use crate::intake::load_documents;
use clap::Args;
use resume_ranker::config::AppConfig;
use resume_ranker::error::AppError;
use resume_ranker::screening::{Document, NormalizationOptions, RankedResult, ResumeRanker};
use resume_ranker::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("job_source").required(true).args(["job", "job_text"]))]
pub(crate) struct RankArgs {
    /// Plain-text job description file
    #[arg(long)]
    pub(crate) job: Option<PathBuf>,
    /// Job description passed inline
    #[arg(long)]
    pub(crate) job_text: Option<String>,
    /// Resume files (plain text); other formats are skipped
    #[arg(required = true)]
    pub(crate) resumes: Vec<PathBuf>,
    /// Drop English stop-words before vectorizing
    #[arg(long)]
    pub(crate) remove_stopwords: bool,
    /// Keep punctuation tokens
    #[arg(long)]
    pub(crate) keep_punctuation: bool,
    /// Keep original casing
    #[arg(long)]
    pub(crate) no_lowercase: bool,
    /// Write the ranking as CSV (rank, identifier, score)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Print each resume's text under its rank
    #[arg(long)]
    pub(crate) show_text: bool,
}

impl RankArgs {
    /// Command-line switches layered over the configured defaults.
    fn normalization(&self, configured: NormalizationOptions) -> NormalizationOptions {
        NormalizationOptions {
            remove_punctuation: configured.remove_punctuation && !self.keep_punctuation,
            remove_stopwords: configured.remove_stopwords || self.remove_stopwords,
            lowercase: configured.lowercase && !self.no_lowercase,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Drop English stop-words before vectorizing
    #[arg(long)]
    pub(crate) remove_stopwords: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let ranker = config
        .ranking
        .build_ranker()?
        .with_normalization(args.normalization(config.ranking.normalization));

    let job_description = match (&args.job, &args.job_text) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(text)) => text.clone(),
        (None, None) => {
            return Err(AppError::Request(
                "either --job or --job-text is required".to_string(),
            ))
        }
    };
    let documents = load_documents(&args.resumes);
    let ranked = ranker.rank(&job_description, &documents);
    info!(
        submitted = documents.len(),
        ranked = ranked.len(),
        "ranking complete"
    );

    render_ranking(&ranked, args.show_text);

    if let Some(path) = &args.csv {
        let file = std::fs::File::create(path)?;
        write_ranking(file, &ranked)?;
        println!("\nCSV export written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let options = if args.remove_stopwords {
        NormalizationOptions::without_stopwords()
    } else {
        NormalizationOptions::default()
    };
    let ranker = ResumeRanker::english().with_normalization(options);

    let (job_description, documents) = demo_batch();
    println!("Job description: {job_description}");
    println!("Candidates submitted: {}", documents.len());

    let ranked = ranker.rank(job_description, &documents);
    render_ranking(&ranked, true);
    Ok(())
}

fn demo_batch() -> (&'static str, Vec<Document>) {
    (
        "Looking for a Python developer with NLP experience",
        vec![
            Document::new("python-nlp.txt", "Python NLP expert, five years' experience."),
            Document::new("designer.txt", "Graphic designer with Adobe skills."),
            Document::new("blank.txt", ""),
        ],
    )
}

pub(crate) fn render_ranking(ranked: &[RankedResult], show_text: bool) {
    if ranked.is_empty() {
        println!("No valid resumes found! Ensure your files contain text.");
        return;
    }

    println!("\nRanked resumes");
    for (line, result) in summary_lines(ranked).iter().zip(ranked) {
        println!("{} | {}", line, result.id);
        if show_text {
            for text_line in result.text.lines() {
                println!("    {}", text_line);
            }
        }
    }
}
