//! scrub — anonymize and curate help-desk exports for knowledge-base use.
//!
//! Scans an input directory for supported files and processes each one:
//! CSV exports go through the full three-phase curation pipeline, plain
//! text files through chunked fake-value anonymization. Run-scoped state
//! is rebuilt per file so replacement values never leak across files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ticket_scrubber::config::PipelineConfig;
use ticket_scrubber::pipeline::anonymize::{
    anonymize_chunked, EntityTagger, HttpRecognizer, ItalianFaker, ReplacementMode,
    SubstitutionRegistry,
};
use ticket_scrubber::pipeline::validate::{ChatClient, OpenAiChatClient, ValidateError};
use ticket_scrubber::pipeline::CuratorPipeline;
use ticket_scrubber::records::{
    dated_output_path, read_csv, to_paragraphs, write_csv, DEFAULT_SEPARATOR,
};

/// HTTP timeout for the analyzer service (seconds).
const RECOGNIZER_TIMEOUT_SECS: u64 = 120;

/// HTTP timeout for the chat-completions endpoint (seconds).
const CHAT_TIMEOUT_SECS: u64 = 300;

#[derive(Parser, Debug)]
#[command(name = "scrub")]
#[command(about = "PII anonymization and curation pipeline for help-desk exports")]
#[command(version)]
struct Args {
    /// Directory scanned for .csv and .txt inputs
    #[arg(short, long, default_value = "input", env = "SCRUB_INPUT_DIR")]
    input: PathBuf,

    /// Output directory for anonymized files
    #[arg(short, long, default_value = "data/anonymized", env = "SCRUB_OUTPUT_DIR")]
    output: PathBuf,

    /// Analyzer service base URL
    #[arg(long, default_value = "http://localhost:5002", env = "SCRUB_ANALYZER_URL")]
    analyzer_url: String,

    /// Chat-completions base URL for the AI validation phase
    #[arg(long, default_value = "https://api.openai.com/v1", env = "SCRUB_CHAT_URL")]
    chat_url: String,

    /// Process only the first N data rows of each CSV (dry runs)
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Also export curated CSVs as paragraph blocks for KB ingestion
    #[arg(long)]
    paragraphs: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ticket_scrubber=info,scrub=info")),
        )
        .init();

    if let Err(e) = run(Args::parse()) {
        tracing::error!(error = %e, "run failed");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let inputs = collect_input_files(&args.input)?;
    if inputs.is_empty() {
        tracing::info!(
            dir = %args.input.display(),
            "no input files found (supported: .csv, .txt)"
        );
        return Ok(());
    }
    tracing::info!(files = inputs.len(), "starting run");

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating output directory {}", args.output.display()))?;

    let config = PipelineConfig {
        row_limit: args.limit,
        ..PipelineConfig::default()
    };

    // Credentials are resolved once; the degraded mode is announced here
    // rather than once per file.
    let chat: Option<Box<dyn ChatClient>> =
        match OpenAiChatClient::from_env(&args.chat_url, CHAT_TIMEOUT_SECS) {
            Ok(client) => Some(Box::new(client)),
            Err(ValidateError::MissingApiKey) => {
                tracing::warn!("no AI credentials; phase 3 will be skipped for all files");
                None
            }
            Err(e) => return Err(e.into()),
        };

    let recognizer = HttpRecognizer::new(&args.analyzer_url, RECOGNIZER_TIMEOUT_SECS);
    let mut pipeline = CuratorPipeline::new(config.clone(), Box::new(recognizer), chat);

    for path in inputs {
        let out_path = dated_output_path(&path, &args.output);
        match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => process_csv(&mut pipeline, &args, &config, &path, &out_path)?,
            Some("txt") => process_text(&args, &config, &path, &out_path)?,
            _ => unreachable!("collect_input_files filters extensions"),
        }
    }

    tracing::info!("run complete");
    Ok(())
}

/// Supported files in the input directory, sorted for stable run order.
fn collect_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "input directory not found");
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading input directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("csv") | Some("txt")
            )
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Full three-phase curation for a CSV export.
fn process_csv(
    pipeline: &mut CuratorPipeline,
    args: &Args,
    config: &PipelineConfig,
    path: &Path,
    out_path: &Path,
) -> Result<()> {
    tracing::info!(file = %path.display(), "processing CSV");

    // Run-scoped substitution state must not leak across files.
    pipeline.reset();
    let input = read_csv(path, config.row_limit)
        .with_context(|| format!("reading {}", path.display()))?;
    let outcome = pipeline
        .run(input)
        .with_context(|| format!("processing {}", path.display()))?;

    write_csv(out_path, &outcome.output)
        .with_context(|| format!("writing {}", out_path.display()))?;

    if args.paragraphs {
        let required = vec![
            config.description_field.clone(),
            config.resolution_field.clone(),
        ];
        let export = to_paragraphs(&outcome.output, &required, DEFAULT_SEPARATOR)?;
        let paragraphs_path = out_path.with_extension("txt");
        fs::write(&paragraphs_path, &export.text)
            .with_context(|| format!("writing {}", paragraphs_path.display()))?;
        tracing::info!(
            path = %paragraphs_path.display(),
            paragraphs = export.paragraphs_written,
            "wrote paragraph export"
        );
    }

    Ok(())
}

/// Chunked fake-value anonymization for a standalone text document.
fn process_text(
    args: &Args,
    config: &PipelineConfig,
    path: &Path,
    out_path: &Path,
) -> Result<()> {
    tracing::info!(file = %path.display(), "processing text document");

    let recognizer = HttpRecognizer::new(&args.analyzer_url, RECOGNIZER_TIMEOUT_SECS);
    let mut tagger = EntityTagger::new(
        Box::new(recognizer),
        SubstitutionRegistry::new(Box::new(ItalianFaker::new())),
        ReplacementMode::FakeValues,
        config.entities.clone(),
        &config.language,
    );

    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let result = anonymize_chunked(&mut tagger, &text, config.chunk_chars)
        .with_context(|| format!("anonymizing {}", path.display()))?;

    fs::write(out_path, &result.text)
        .with_context(|| format!("writing {}", out_path.display()))?;
    tracing::info!(
        path = %out_path.display(),
        entities = result.entity_count,
        "wrote anonymized document"
    );
    Ok(())
}
