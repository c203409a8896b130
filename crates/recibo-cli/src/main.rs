//! CLI application for receipt OCR structured extraction.
//!
//! Process contract: one positional image path, exactly one line of JSON on
//! stdout. A missing argument exits with code 1 and an error document
//! before any resource is acquired; every later failure is normalized into
//! the pipeline's failure document. Logs go to stderr only.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde_json::json;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use recibo_core::models::config::ReciboConfig;
use recibo_core::{
    GeminiClient, PipelineResult, PromptVariant, ReceiptPipeline, TextExtractor, PROCESS_ERROR,
};

/// Receipt OCR - extract structured expense data from a receipt photo
#[derive(Parser)]
#[command(name = "recibo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the receipt image
    image: Option<PathBuf>,

    /// Output schema variant
    #[arg(long, value_enum, default_value = "detailed")]
    variant: Variant,

    /// Directory containing OCR model files
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variant {
    /// Full itemized breakdown
    Detailed,
    /// Title/amount/category summary
    Aggregate,
}

impl From<Variant> for PromptVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Detailed => PromptVariant::Detailed,
            Variant::Aggregate => PromptVariant::Aggregate,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity; stdout is reserved for the one
    // JSON document, so the subscriber writes to stderr.
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Input gate: checked before any resource is acquired.
    let Some(image) = cli.image.clone() else {
        println!("{}", json!({"error": "Image path argument missing"}));
        return ExitCode::from(1);
    };

    let result = match run_pipeline(&cli, &image).await {
        Ok(result) => result,
        Err(e) => PipelineResult::failure(format!("{:#}", e)),
    };

    match serde_json::to_string(&result) {
        Ok(line) => println!("{}", line),
        Err(e) => println!(
            "{}",
            json!({"error": PROCESS_ERROR, "details": e.to_string()})
        ),
    }

    ExitCode::SUCCESS
}

async fn run_pipeline(cli: &Cli, image: &PathBuf) -> anyhow::Result<PipelineResult> {
    let config = match &cli.config {
        Some(path) => ReciboConfig::from_file(path)?,
        None => ReciboConfig::default(),
    };

    let model_dir = cli
        .model_dir
        .clone()
        .unwrap_or_else(|| config.ocr.model_dir.clone());

    // Credential check before the expensive model load.
    let client = GeminiClient::from_env(config.llm.clone())?;
    let extractor = TextExtractor::from_dir(&model_dir, config.ocr.clone())?;

    let pipeline = ReceiptPipeline::new(extractor, client);
    Ok(pipeline.run(image, cli.variant.into()).await)
}
