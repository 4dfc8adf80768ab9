use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use catalogue_qc::input::{InputError, read_maybe_gz};
use catalogue_qc::logging::init_tracing;
use catalogue_qc::model::diagnostics::Diagnostic;
use catalogue_qc::model::thresholds::{ThresholdProfile, ThresholdVariant};
use catalogue_qc::pipeline::score_upload;
use catalogue_qc::pipeline::stage3_report::write_reports;
use catalogue_qc::report::ReportError;
use catalogue_qc::scorer::{CommandScorer, Scorer};
use catalogue_qc::server::{self, AppState, DEFAULT_MAX_UPLOAD_BYTES, ScorerFactory, ServeError};

#[derive(Debug, Parser)]
#[command(
    name = "catalogue-qc",
    version,
    about = "Score product catalogue CSVs on Correctness, Compliance and Completeness"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score one CSV file and write the report directory.
    Run(RunArgs),
    /// Serve the upload page.
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Catalogue CSV, optionally gzipped (`.gz`).
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[command(flatten)]
    scoring: ScoringArgs,
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[arg(long, env = "CATALOGUE_QC_BIND", default_value = "127.0.0.1:8501")]
    bind: SocketAddr,
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,
    #[command(flatten)]
    scoring: ScoringArgs,
}

#[derive(Debug, Args)]
struct ScoringArgs {
    /// Scorer program: reads a one-row CSV on stdin, writes the scored CSV to stdout.
    #[arg(long, env = "CATALOGUE_QC_SCORER")]
    scorer: String,
    /// Extra argument for the scorer program; repeatable.
    #[arg(long = "scorer-arg", allow_hyphen_values = true)]
    scorer_args: Vec<String>,
    #[arg(long, value_enum, default_value_t = ThresholdVariant::Strict)]
    threshold_profile: ThresholdVariant,
    /// Explicit falling-short cut-off; replaces the profile value.
    #[arg(long, env = "CATALOGUE_QC_THRESHOLD")]
    threshold: Option<f64>,
}

impl ScoringArgs {
    fn thresholds(&self) -> ThresholdProfile {
        ThresholdProfile::resolve(self.threshold_profile, self.threshold)
    }

    fn command_scorer(&self) -> CommandScorer {
        CommandScorer::new(self.scorer.clone(), self.scorer_args.clone())
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Serve(#[from] ServeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Rejected(String),
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => run(&args),
        Command::Serve(args) => serve(&args),
    };
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> Result<(), CliError> {
    let thresholds = args.scoring.thresholds();
    info!(
        "falling-short threshold {} ({})",
        thresholds.falling_short_below, thresholds.label
    );

    let bytes = read_maybe_gz(&args.input)?;
    let mut scorer = args.scoring.command_scorer();
    let outcome = score_upload(&bytes, &mut scorer, &thresholds)?;

    let Some(report) = &outcome.report else {
        return Err(CliError::Rejected(rejection_message(&outcome.diagnostics)));
    };
    write_reports(report, &outcome.diagnostics, &args.out)?;

    let summary = &report.summary;
    info!(
        "{} of {} rows scored, {} failed, {} falling short",
        summary.n_scored_rows,
        summary.n_input_rows,
        summary.n_failed_rows,
        summary.falling_short_rows
    );
    Ok(())
}

fn serve(args: &ServeArgs) -> Result<(), CliError> {
    let thresholds = args.scoring.thresholds();
    let scorer = args.scoring.command_scorer();
    info!(
        "scorer: {}; falling-short threshold {} ({})",
        scorer.describe(),
        thresholds.falling_short_below,
        thresholds.label
    );
    let factory: ScorerFactory = Arc::new(move || Box::new(scorer.clone()) as Box<dyn Scorer + Send>);
    let state = AppState::new(factory, thresholds);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(args.bind, state, args.max_upload_bytes))?;
    Ok(())
}

fn rejection_message(diagnostics: &[Diagnostic]) -> String {
    let errors: Vec<&str> = diagnostics
        .iter()
        .filter(|d| d.is_error())
        .map(Diagnostic::message)
        .collect();
    if errors.is_empty() {
        "catalogue rejected".to_string()
    } else {
        errors.join("; ")
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
