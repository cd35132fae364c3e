use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ytbrief::server::{self, AppState};
use ytbrief::{Cli, Commands, Config, GeminiClient, TranscriptResolver};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "ytbrief=debug,tower_http=debug"
    } else {
        "ytbrief=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().await?;

    match cli.command {
        Commands::Serve { host, port } => {
            let api_key = config.api_key()?;
            let summarizer = GeminiClient::new(api_key, config.gemini.model.clone());
            let resolver = TranscriptResolver::new(&config.resolver);

            let state = Arc::new(AppState {
                resolver,
                summarizer: Arc::new(summarizer),
            });

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            tracing::info!(model = %config.gemini.model, "starting ytbrief");
            server::serve(state, &host, port).await?;
        }
        Commands::Config => {
            config.display();
        }
    }

    Ok(())
}
