//! The `fishid classify` command: one-shot classification of a local image.

use clap::Args;
use fishid_core::{Classifier, Config, ImageFormat, UploadValidator};
use std::path::{Path, PathBuf};

use super::types::LlmProvider;

/// Arguments for the `classify` command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// JPEG or PNG image to classify
    #[arg(required = true)]
    pub input: PathBuf,

    /// LLM provider (overrides `llm.provider`)
    #[arg(long, value_enum)]
    pub llm: Option<LlmProvider>,

    /// LLM model name (provider-specific)
    #[arg(long)]
    pub llm_model: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the classify command.
pub async fn execute(args: ClassifyArgs) -> anyhow::Result<()> {
    if !args.input.is_file() {
        anyhow::bail!(
            "Input file does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            args.input
        );
    }

    let config = Config::load()?;
    let bytes = tokio::fs::read(&args.input).await?;

    // Same checks as an HTTP upload, with the extension standing in for the content type.
    let validator = UploadValidator::new(config.limits.clone());
    let format = validator.validate(declared_mime(&args.input), &bytes)?;

    let provider = args.llm.map(|p| p.to_string());
    let classifier =
        Classifier::from_config(&config, provider.as_deref(), args.llm_model.as_deref())?;

    tracing::info!(
        "Classifying {} ({format}, {} bytes) with {}",
        args.input.display(),
        bytes.len(),
        classifier.provider_name()
    );

    let record = classifier.classify(&bytes, format).await;

    let json = if args.pretty {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string(&record)?
    };
    println!("{json}");

    Ok(())
}

/// MIME type implied by the file extension, if it is a known image type.
///
/// Unknown extensions yield `None` so the validator falls back to magic bytes.
fn declared_mime(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .map(|format| format.mime_type())
}
