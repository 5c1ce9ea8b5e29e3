//! The `fishid facts` command.

use clap::Args;
use fishid_core::{Classifier, Config};

use super::types::LlmProvider;

/// Arguments for the `facts` command.
#[derive(Args, Debug)]
pub struct FactsArgs {
    /// Species name, e.g. "Rainbow Trout"
    #[arg(required = true)]
    pub species: String,

    /// LLM provider (overrides `llm.provider`)
    #[arg(long, value_enum)]
    pub llm: Option<LlmProvider>,

    /// LLM model name (provider-specific)
    #[arg(long)]
    pub llm_model: Option<String>,

    /// Print only the facts text instead of JSON
    #[arg(long)]
    pub raw: bool,
}

/// Execute the facts command.
pub async fn execute(args: FactsArgs) -> anyhow::Result<()> {
    let config = Config::load()?;

    let provider = args.llm.map(|p| p.to_string());
    let classifier =
        Classifier::from_config(&config, provider.as_deref(), args.llm_model.as_deref())?;

    let facts = classifier.facts(args.species.trim()).await;

    if args.raw {
        println!("{}", facts.facts);
    } else {
        println!("{}", serde_json::to_string_pretty(&facts)?);
    }

    Ok(())
}
