//! The `fishid serve` command: run the HTTP service.

use clap::Args;
use fishid_core::{Classifier, Config, UploadValidator};

use super::types::LlmProvider;
use crate::server::{self, AppState};

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides `server.host`)
    #[arg(long, env = "FISHID_HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(short, long, env = "FISHID_PORT")]
    pub port: Option<u16>,

    /// LLM provider (overrides `llm.provider`)
    #[arg(long, value_enum)]
    pub llm: Option<LlmProvider>,

    /// LLM model name (provider-specific)
    #[arg(long)]
    pub llm_model: Option<String>,
}

/// Execute the serve command.
pub async fn execute(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // A missing credential stops startup here rather than on the first request.
    let provider = args.llm.map(|p| p.to_string());
    let classifier =
        Classifier::from_config(&config, provider.as_deref(), args.llm_model.as_deref())?;

    if !classifier.is_available().await {
        tracing::warn!(
            "{} provider is not reachable right now; requests will return placeholder records until it is",
            classifier.provider_name()
        );
    }

    let provider_name = classifier.provider_name().to_string();
    let state = AppState::new(classifier, UploadValidator::new(config.limits.clone()));
    let app = server::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}"))?;

    tracing::info!(
        provider = %provider_name,
        max_upload_mb = config.limits.max_upload_mb,
        "Listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
