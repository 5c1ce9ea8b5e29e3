//! The `fishid config` command for configuration management.

use clap::{Args, Subcommand};
use fishid_core::llm::PROVIDERS;
use fishid_core::{Config, LlmProviderFactory};
use std::path::Path;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Report which LLM providers have usable credentials
    Check,
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            let path = Config::default_path();
            let note = if path.exists() { "" } else { " (not created yet)" };
            println!("{}{note}", path.display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();
            write_default(&path, force)?;
            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }

        ConfigCommand::Check => {
            let config = Config::load()?;
            for line in credential_report(&config) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Write the default configuration to `path`, refusing to clobber unless forced.
fn write_default(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, Config::default().to_toml()?)?;
    Ok(())
}

/// One status line per provider. The active provider is marked with `*`.
fn credential_report(config: &Config) -> Vec<String> {
    PROVIDERS
        .iter()
        .map(|&name| {
            let marker = if name == config.llm.provider { "*" } else { " " };
            match LlmProviderFactory::create(name, &config.llm, None) {
                Ok(_) => format!("{marker} {name:<10} ready"),
                Err(e) => format!("{marker} {name:<10} {e}"),
            }
        })
        .collect()
}
