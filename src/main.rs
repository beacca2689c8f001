//! `doccmp` - compare a PDF manuscript with its DOCX conversion.
//!
//! Writes an HTML report and a JSON summary, prints one `Summary:` line on
//! stdout and logs to stderr. Exits non-zero when a file cannot be read or
//! parsed, or the report cannot be written.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use doccmp::{ComparatorConfig, LogFormat, OutputPaths, run, summary_line};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "doccmp")]
#[command(
    version,
    about = "Compare the text of a PDF document with a Word (DOCX) document"
)]
struct Args {
    /// Source PDF document
    pdf: PathBuf,

    /// Word document to check against the PDF
    docx: PathBuf,

    /// HTML report path
    #[arg(long, default_value = "compare_report.html")]
    out: PathBuf,

    /// JSON summary path
    #[arg(long, default_value = "compare_summary.json")]
    summary: PathBuf,

    /// Do not write the JSON summary
    #[arg(long)]
    no_summary: bool,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sentence match threshold, as a fraction (0.8) or a percentage (80)
    #[arg(long)]
    sentence_threshold: Option<f64>,

    /// Keep hyphens at line breaks instead of joining the word halves
    #[arg(long)]
    no_strip_hyphenation: bool,

    /// Log format on stderr: pretty or json
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ComparatorConfig::from_file(path)?,
        None => ComparatorConfig::default(),
    };
    if let Some(threshold) = args.sentence_threshold {
        config = config.with_sentence_threshold(threshold);
    }
    if args.no_strip_hyphenation {
        config.canonical.strip_hyphenation = false;
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }
    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    init_tracing(&config);

    let paths = OutputPaths {
        report: args.out,
        summary: (!args.no_summary).then_some(args.summary),
    };

    match run(&args.pdf, &args.docx, &config, &paths) {
        Ok(output) => {
            tracing::info!(report = %output.written.html.display(), "comparison_complete");
            println!("{}", summary_line(output.run.metrics()));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(operation = err.operation(), error = %err, "comparison_failed");
            match err.path() {
                Some(path) => eprintln!(
                    "error: failed to {} ({}): {err}",
                    err.operation(),
                    path.display()
                ),
                None => eprintln!("error: failed to {}: {err}", err.operation()),
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(config: &ComparatorConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
